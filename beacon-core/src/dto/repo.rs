//! Repository listing DTOs

use serde::Deserialize;

use crate::domain::repo::{Owner, Repository};

/// One page of the repository search response
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPage {
    pub total_count: u64,
    pub items: Vec<RepositoryDto>,
}

/// Repository object as returned by the hosting API
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryDto {
    pub id: i64,
    pub name: String,
    pub owner: OwnerDto,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerDto {
    pub login: String,
}

impl From<RepositoryDto> for Repository {
    fn from(dto: RepositoryDto) -> Self {
        Repository {
            id: dto.id,
            name: dto.name,
            owner: Owner {
                login: dto.owner.login,
            },
            archived: dto.archived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_page() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 101,
                    "name": "terraform-aws-cluster",
                    "owner": { "login": "dcos-terraform", "id": 7 },
                    "archived": false
                },
                {
                    "id": 102,
                    "name": "terraform-aws-old",
                    "owner": { "login": "dcos-terraform" },
                    "archived": true
                }
            ]
        }"#;

        let page: RepositoryPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.items[1].archived);
    }

    #[test]
    fn test_archived_defaults_to_false() {
        let body = r#"{
            "id": 103,
            "name": "terraform-gcp-base",
            "owner": { "login": "dcos-terraform" }
        }"#;

        let dto: RepositoryDto = serde_json::from_str(body).unwrap();
        assert!(!dto.archived);
    }

    #[test]
    fn test_dto_into_domain() {
        let dto = RepositoryDto {
            id: 7,
            name: "terraform-azurerm-base".to_string(),
            owner: OwnerDto {
                login: "dcos-terraform".to_string(),
            },
            archived: false,
        };

        let repo: Repository = dto.into();
        assert_eq!(repo.id, 7);
        assert_eq!(repo.name, "terraform-azurerm-base");
        assert_eq!(repo.owner.login, "dcos-terraform");
        assert!(!repo.archived);
    }
}
