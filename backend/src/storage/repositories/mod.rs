// Repository modules
pub mod activity_record_repository;
pub mod activity_repository;
pub mod asset_repository;
pub mod employee_repository;
pub mod labor_entry_repository;
pub mod rental_payment_repository;
pub mod rental_repository;
pub mod settings_repository;
pub mod transaction_repository;

// Re-export repository types
pub use activity_record_repository::ActivityRecordRepository;
pub use activity_repository::ActivityRepository;
pub use asset_repository::AssetRepository;
pub use employee_repository::EmployeeRepository;
pub use labor_entry_repository::LaborEntryRepository;
pub use rental_payment_repository::RentalPaymentRepository;
pub use rental_repository::RentalRepository;
pub use settings_repository::SettingsRepository;
pub use transaction_repository::TransactionRepository;
