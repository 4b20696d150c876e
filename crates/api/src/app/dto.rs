use chrono::NaiveDate;
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
    pub shop_type: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_update(self) -> shopledger_profile::ShopProfileUpdate {
        shopledger_profile::ShopProfileUpdate {
            owner_name: self.owner_name,
            email: self.email,
            shop_name: self.shop_name,
            shop_type: self.shop_type,
            address: self.address,
            tax_number: self.tax_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub company: String,
    pub name: String,
    /// Price in smallest currency unit (cents).
    pub unit_price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub unit_price: Option<u64>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsPageQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceLineRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    pub payment_method: String,
    pub issued_on: NaiveDate,
    pub lines: Vec<CreateInvoiceLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderLineRequest {
    #[serde(default)]
    pub company: String,
    pub product: String,
    pub quantity: u32,
    /// Cost in smallest currency unit (cents).
    pub unit_cost: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_address: String,
    #[serde(default)]
    pub supplier_state: String,
    pub lines: Vec<CreatePurchaseOrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub category: String,
    /// Amount in smallest currency unit (cents).
    pub amount: u64,
    pub spent_on: NaiveDate,
    #[serde(default)]
    pub vendor: String,
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct SalesReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub payment_method: Option<String>,
    pub q: Option<String>,
}
