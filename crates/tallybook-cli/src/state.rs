use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tallybook::{
    AppSettings, DataFile, Estimate, Invoice, Product, RemoteFile, RemoteStore, StockMovement,
    User,
};

/// Everything the application works on, loaded from the repository in one
/// pass and written back one file at a time as commands change it.
pub struct AppState {
    store: Arc<dyn RemoteStore>,
    pub settings: AppSettings,
    pub products: Vec<Product>,
    pub stock: Vec<StockMovement>,
    pub estimates: Vec<Estimate>,
    pub invoices: Vec<Invoice>,
    pub users: Vec<User>,
}

impl AppState {
    /// Fetch all six collections concurrently. An absent file is an empty
    /// collection; absent settings fall back to the locally cached blob.
    pub async fn load(store: Arc<dyn RemoteStore>, local_settings: AppSettings) -> Result<Self> {
        let (products, stock, estimates, invoices, settings, users) = futures::try_join!(
            store.fetch(DataFile::Products.path()),
            store.fetch(DataFile::Stock.path()),
            store.fetch(DataFile::Estimates.path()),
            store.fetch(DataFile::Invoices.path()),
            store.fetch(DataFile::Settings.path()),
            store.fetch(DataFile::Users.path()),
        )
        .context("failed to fetch data from GitHub")?;

        let settings = match settings {
            Some(file) => decode(DataFile::Settings, &file)?,
            None => local_settings,
        };

        Ok(Self {
            store,
            settings,
            products: decode_collection(DataFile::Products, products)?,
            stock: decode_collection(DataFile::Stock, stock)?,
            estimates: decode_collection(DataFile::Estimates, estimates)?,
            invoices: decode_collection(DataFile::Invoices, invoices)?,
            users: decode_collection(DataFile::Users, users)?,
        })
    }

    pub async fn save_products(&self) -> Result<()> {
        self.save(DataFile::Products, &self.products, "update products")
            .await
    }

    pub async fn save_estimates(&self) -> Result<()> {
        self.save(DataFile::Estimates, &self.estimates, "update estimates")
            .await
    }

    pub async fn save_invoices(&self) -> Result<()> {
        self.save(DataFile::Invoices, &self.invoices, "update invoices")
            .await
    }

    pub async fn save_users(&self) -> Result<()> {
        self.save(DataFile::Users, &self.users, "update users").await
    }

    /// A stock change touches two files: the movement ledger, then the
    /// adjusted product quantities.
    pub async fn save_stock_and_products(&self) -> Result<()> {
        self.save(DataFile::Stock, &self.stock, "update stock movements")
            .await?;
        self.save(
            DataFile::Products,
            &self.products,
            "update product quantities from stock change",
        )
        .await
    }

    async fn save<T: Serialize>(&self, file: DataFile, data: &T, message: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .with_context(|| format!("failed to encode {}", file.path()))?;

        self.store
            .upsert(file.path(), &json, message)
            .await
            .with_context(|| format!("sync failed for {}", file.path()))?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(file: DataFile, fetched: &RemoteFile) -> Result<T> {
    serde_json::from_str(&fetched.content)
        .with_context(|| format!("malformed JSON in {}", file.path()))
}

fn decode_collection<T: DeserializeOwned>(
    file: DataFile,
    fetched: Option<RemoteFile>,
) -> Result<Vec<T>> {
    match fetched {
        Some(file_content) => decode(file, &file_content),
        None => Ok(Vec::new()),
    }
}
