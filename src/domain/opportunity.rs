//! Opportunity type with builder pattern.
//!
//! An `Opportunity` is one profitable (product, vendor offer) pair under the
//! current pricing mode. `OpportunityBuilder` computes the derived profit
//! fields so they can never disagree with the inputs.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::catalog::VendorOffer;
use super::ids::ProductId;
use super::money::Price;
use super::profit::{daily_projected_profit, profit_margin, DAILY_UNIT_LIMIT};

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    /// Product ID is required but was not provided.
    MissingProductId,
    /// Display price is required but was not provided.
    MissingDisplayPrice,
    /// Vendor offer is required but was not provided.
    MissingVendor,
    /// A derived profit figure fell outside the representable range.
    Overflow,
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProductId => write!(f, "product_id is required"),
            Self::MissingDisplayPrice => write!(f, "display_price is required"),
            Self::MissingVendor => write!(f, "vendor is required"),
            Self::Overflow => write!(f, "profit is out of range"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// A ranked buy-from-NPC, sell-to-market trade.
///
/// Recomputed every cycle; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    product_id: ProductId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    display_price: Price,
    vendor_buy_price: Price,
    profit_margin: Price,
    daily_projected_profit: Price,
    vendor: VendorOffer,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Display name, or the raw product id when the catalog has no metadata.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image path under the asset root, if known.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Market price under the mode the opportunity was computed for.
    pub fn display_price(&self) -> Price {
        self.display_price
    }

    pub fn vendor_buy_price(&self) -> Price {
        self.vendor_buy_price
    }

    pub fn profit_margin(&self) -> Price {
        self.profit_margin
    }

    pub fn daily_projected_profit(&self) -> Price {
        self.daily_projected_profit
    }

    pub fn vendor(&self) -> &VendorOffer {
        &self.vendor
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .product_id(ProductId::from("WHEAT"))
///     .name("Wheat")
///     .display_price(dec!(10))
///     .vendor(VendorOffer::new("Farm Merchant", dec!(5)))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct OpportunityBuilder {
    product_id: Option<ProductId>,
    name: Option<String>,
    image: Option<String>,
    display_price: Option<Price>,
    vendor: Option<VendorOffer>,
    fee: Price,
    daily_limit: u32,
}

impl Default for OpportunityBuilder {
    fn default() -> Self {
        Self {
            product_id: None,
            name: None,
            image: None,
            display_price: None,
            vendor: None,
            fee: Decimal::ZERO,
            daily_limit: DAILY_UNIT_LIMIT,
        }
    }
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_id(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn display_price(mut self, price: Price) -> Self {
        self.display_price = Some(price);
        self
    }

    pub fn vendor(mut self, vendor: VendorOffer) -> Self {
        self.vendor = Some(vendor);
        self
    }

    /// Fixed per-unit fee subtracted from the margin.
    pub fn fee(mut self, fee: Price) -> Self {
        self.fee = fee;
        self
    }

    /// Units per day used for the daily projection.
    pub fn daily_limit(mut self, daily_limit: u32) -> Self {
        self.daily_limit = daily_limit;
        self
    }

    /// Build the Opportunity, calculating derived fields.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if any required field is missing or
    /// the derived profit does not fit in a `Decimal`.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let product_id = self
            .product_id
            .ok_or(OpportunityBuildError::MissingProductId)?;
        let display_price = self
            .display_price
            .ok_or(OpportunityBuildError::MissingDisplayPrice)?;
        let vendor = self.vendor.ok_or(OpportunityBuildError::MissingVendor)?;
        let name = self.name.unwrap_or_else(|| product_id.to_string());

        let vendor_buy_price = vendor.buy_price;
        let margin = profit_margin(Some(display_price), Some(vendor_buy_price), self.fee)
            .ok_or(OpportunityBuildError::Overflow)?;
        let daily = daily_projected_profit(Some(margin), self.daily_limit)
            .ok_or(OpportunityBuildError::Overflow)?;

        Ok(Opportunity {
            product_id,
            name,
            image: self.image,
            display_price,
            vendor_buy_price,
            profit_margin: margin,
            daily_projected_profit: daily,
            vendor,
        })
    }
}
