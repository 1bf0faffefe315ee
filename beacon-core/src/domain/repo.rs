//! Repository and provider-bucket types

use regex::Regex;

/// Owner of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub login: String,
}

/// A single repository as reported by the hosting API
///
/// Immutable once fetched; the whole set is replaced on every listing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub owner: Owner,
    pub archived: bool,
}

/// Repositories classified under one provider key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub provider: String,
    pub repositories: Vec<Repository>,
}

/// Partitions repositories into one bucket per provider key.
///
/// A provider key matches repositories named `<prefix><provider>...`,
/// case-sensitively. Archived repositories are dropped. Bucket order
/// follows the provider list; repository order within a bucket follows
/// the listing order. A repository whose name matches more than one
/// provider key lands in every matching bucket.
pub fn partition_by_provider(
    repositories: &[Repository],
    prefix: &str,
    providers: &[String],
) -> Result<Vec<Bucket>, regex::Error> {
    let mut buckets = Vec::with_capacity(providers.len());

    for provider in providers {
        let pattern = Regex::new(&format!(
            "^{}{}.*$",
            regex::escape(prefix),
            regex::escape(provider)
        ))?;

        let matching = repositories
            .iter()
            .filter(|repo| !repo.archived && pattern.is_match(&repo.name))
            .cloned()
            .collect();

        buckets.push(Bucket {
            provider: provider.clone(),
            repositories: matching,
        });
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, archived: bool) -> Repository {
        Repository {
            id: name.len() as i64,
            name: name.to_string(),
            owner: Owner {
                login: "dcos-terraform".to_string(),
            },
            archived,
        }
    }

    fn providers(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_partition_excludes_archived() {
        let repos = vec![
            repo("terraform-aws-cluster", false),
            repo("terraform-gcp-base", false),
            repo("terraform-aws-old", true),
        ];

        let buckets =
            partition_by_provider(&repos, "terraform-", &providers(&["aws", "gcp"])).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].provider, "aws");
        assert_eq!(buckets[0].repositories.len(), 1);
        assert_eq!(buckets[0].repositories[0].name, "terraform-aws-cluster");
        assert_eq!(buckets[1].provider, "gcp");
        assert_eq!(buckets[1].repositories.len(), 1);
        assert_eq!(buckets[1].repositories[0].name, "terraform-gcp-base");
    }

    #[test]
    fn test_partition_keeps_listing_order() {
        let repos = vec![
            repo("terraform-aws-zeta", false),
            repo("terraform-aws-alpha", false),
            repo("terraform-aws-mid", false),
        ];

        let buckets = partition_by_provider(&repos, "terraform-", &providers(&["aws"])).unwrap();

        let names: Vec<&str> = buckets[0]
            .repositories
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["terraform-aws-zeta", "terraform-aws-alpha", "terraform-aws-mid"]
        );
    }

    #[test]
    fn test_multi_match_appears_in_every_bucket() {
        // Both keys are prefixes of the same name, so the repository
        // lands in both buckets. No deduplication across buckets.
        let repos = vec![repo("terraform-aws-thing", false)];

        let buckets = partition_by_provider(&repos, "terraform-", &providers(&["aws", "aws-th"]))
            .unwrap();

        assert_eq!(buckets[0].repositories.len(), 1);
        assert_eq!(buckets[1].repositories.len(), 1);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let repos = vec![repo("Terraform-AWS-cluster", false)];

        let buckets = partition_by_provider(&repos, "terraform-", &providers(&["aws"])).unwrap();

        assert!(buckets[0].repositories.is_empty());
    }

    #[test]
    fn test_prefix_is_escaped_not_a_pattern() {
        // A "." in the prefix must match literally, not as a wildcard.
        let repos = vec![repo("terraformXaws-cluster", false)];

        let buckets = partition_by_provider(&repos, "terraform.", &providers(&["aws"])).unwrap();

        assert!(buckets[0].repositories.is_empty());
    }

    #[test]
    fn test_empty_provider_list_yields_no_buckets() {
        let repos = vec![repo("terraform-aws-cluster", false)];

        let buckets = partition_by_provider(&repos, "terraform-", &[]).unwrap();

        assert!(buckets.is_empty());
    }
}
