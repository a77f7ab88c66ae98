pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod hours_bank_repo;
pub use hours_bank_repo::HoursBankRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod org_repo;
pub use org_repo::OrgRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
