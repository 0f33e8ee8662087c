pub mod access;
pub mod billing;
pub mod datafile;
mod id;
pub mod money;
pub mod product;
pub mod remote;
pub mod settings;
pub mod stock;
pub mod user;

pub use access::{Page, pages_for};
pub use billing::{
    BillingError, Customer, Estimate, EstimateStatus, GST_RATE, Invoice, InvoiceStatus, LineItem,
};
pub use datafile::DataFile;
pub use product::Product;
pub use remote::{RemoteFile, RemoteStore, StoreError};
pub use settings::{AppSettings, CompanyDetails, Theme};
pub use stock::{StockError, StockMovement, StockMovementType};
pub use user::{User, UserError, UserRole};
