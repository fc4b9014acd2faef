//! Type definitions for the meal planner API.
//!
//! This module contains the request and response shapes exchanged with the
//! backend, the list filters sent as query parameters, and a few helpers the
//! presentation layer leans on: client-side validation of request payloads,
//! pagination math, and quantity formatting.
//!
//! ## Key Types
//!
//! - [`PantryLot`] - An inventory entry (ingredient or packaged good)
//! - [`Recipe`] - A recipe with ordered ingredients and instructions
//! - [`ListResponse`] - Paginated list wrapper; `total` drives pagination
//! - [`HealthResponse`] - Backend liveness report
//!
//! ## Wire Format
//!
//! All JSON field names are camelCase (`createdAt`, `traceId`, ...). Update
//! payloads are full replacements: every field is sent, not just the changed
//! ones.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Query parameters for a GET request. `None` and empty values are dropped
/// before the request is sent.
pub type QueryParams = Vec<(&'static str, Option<String>)>;

/// Kind of pantry lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PantryLotType {
    Ingredient,
    Packaged,
}

impl PantryLotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PantryLotType::Ingredient => "INGREDIENT",
            PantryLotType::Packaged => "PACKAGED",
        }
    }
}

impl fmt::Display for PantryLotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked inventory item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryLot {
    /// Server-assigned identifier
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub lot_type: PantryLotType,
    /// Amount on hand, never negative
    pub quantity: f64,
    pub unit: String,
    /// Free-form attributes (brand, expiry, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PantryLot {
    pub fn display_quantity(&self) -> String {
        format_quantity(self.quantity, &self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryLotCreateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub lot_type: PantryLotType,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl PantryLotCreateRequest {
    pub fn new(
        name: impl Into<String>,
        lot_type: PantryLotType,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lot_type,
            quantity,
            unit: unit.into(),
            metadata: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_pantry_fields(&self.name, self.quantity, &self.unit)
    }
}

/// Full replacement payload for `PUT /pantry/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryLotUpdateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub lot_type: PantryLotType,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl PantryLotUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_pantry_fields(&self.name, self.quantity, &self.unit)
    }
}

/// Start an edit from the record as it currently stands.
impl From<&PantryLot> for PantryLotUpdateRequest {
    fn from(lot: &PantryLot) -> Self {
        Self {
            name: lot.name.clone(),
            lot_type: lot.lot_type,
            quantity: lot.quantity,
            unit: lot.unit.clone(),
            metadata: lot.metadata.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PantryFilters {
    pub lot_type: Option<PantryLotType>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PantryFilters {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("type", self.lot_type.map(|t| t.as_str().to_string())),
            ("name", self.name.clone()),
            ("limit", self.limit.map(|l| l.to_string())),
            ("offset", self.offset.map(|o| o.to_string())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    pub fn display_quantity(&self) -> String {
        format_quantity(self.quantity, &self.unit)
    }
}

/// Where the recipe's vector embedding lives, if it has been indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEmbedding {
    pub qdrant_collection: String,
    pub vector_id: String,
    pub embedded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// In display order
    pub ingredients: Vec<RecipeIngredient>,
    /// In cooking order
    pub instructions: Vec<String>,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<RecipeEmbedding>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreateRequest {
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RecipeCreateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_recipe_fields(&self.name, self.servings, &self.ingredients, &self.instructions)
    }

    /// Trim text fields, drop blank ingredients and instructions, and
    /// normalize tags the way they are stored.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ingredients: normalize_ingredients(self.ingredients),
            instructions: normalize_instructions(self.instructions),
            servings: self.servings,
            tags: normalize_tags(self.tags),
        }
    }
}

/// Full replacement payload for `PUT /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdateRequest {
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub servings: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RecipeUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_recipe_fields(&self.name, self.servings, &self.ingredients, &self.instructions)
    }

    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ingredients: normalize_ingredients(self.ingredients),
            instructions: normalize_instructions(self.instructions),
            servings: self.servings,
            tags: normalize_tags(self.tags),
        }
    }
}

impl From<&Recipe> for RecipeUpdateRequest {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            servings: recipe.servings,
            tags: recipe.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilters {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RecipeFilters {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("tag", self.tag.clone()),
            ("name", self.name.clone()),
            ("limit", self.limit.map(|l| l.to_string())),
            ("offset", self.offset.map(|o| o.to_string())),
        ]
    }
}

/// Paginated list wrapper. `total` counts every matching record on the
/// server and may exceed `items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListResponse<T> {
    pub fn page(&self, limit: u32, offset: u32) -> Page {
        Page::new(self.total, limit, offset)
    }
}

/// Position of one page within a list, derived from the server's `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn new(total: u64, limit: u32, offset: u32) -> Self {
        Self { total, limit, offset }
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    /// 1-based.
    pub fn current_page(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        u64::from(self.offset) / u64::from(self.limit) + 1
    }

    /// 1-based index of the first item shown, 0 when the page is empty.
    pub fn first_item(&self) -> u64 {
        if u64::from(self.offset) >= self.total {
            0
        } else {
            u64::from(self.offset) + 1
        }
    }

    pub fn last_item(&self) -> u64 {
        (u64::from(self.offset) + u64::from(self.limit)).min(self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.limit > 0 && u64::from(self.offset) + u64::from(self.limit) < self.total
    }

    pub fn previous_offset(&self) -> u32 {
        self.offset.saturating_sub(self.limit)
    }

    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    pub time: DateTime<Utc>,
}

impl HealthResponse {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

/// Field-level problems found before a payload is sent, keyed by the JSON
/// field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid request: {}", self.summary())]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.fields.insert(field, message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn validate_pantry_fields(name: &str, quantity: f64, unit: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    if !quantity.is_finite() || quantity < 0.0 {
        errors.add("quantity", "Quantity must be a non-negative number");
    }
    if unit.trim().is_empty() {
        errors.add("unit", "Unit is required");
    }
    errors.into_result()
}

fn validate_recipe_fields(
    name: &str,
    servings: u32,
    ingredients: &[RecipeIngredient],
    instructions: &[String],
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if name.trim().is_empty() {
        errors.add("name", "Recipe name is required");
    }
    if servings < 1 {
        errors.add("servings", "Servings must be at least 1");
    }
    if !ingredients.iter().any(|i| !i.name.trim().is_empty()) {
        errors.add("ingredients", "At least one ingredient is required");
    }
    if !instructions.iter().any(|i| !i.trim().is_empty()) {
        errors.add("instructions", "At least one instruction is required");
    }
    errors.into_result()
}

fn normalize_ingredients(ingredients: Vec<RecipeIngredient>) -> Vec<RecipeIngredient> {
    ingredients
        .into_iter()
        .filter(|i| !i.name.trim().is_empty())
        .map(|i| RecipeIngredient {
            name: i.name.trim().to_string(),
            quantity: i.quantity,
            unit: i.unit.trim().to_string(),
        })
        .collect()
}

fn normalize_instructions(instructions: Vec<String>) -> Vec<String> {
    instructions
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Split comma-separated tag input into stored form: trimmed, lowercased,
/// blanks dropped.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// `2.0, "cup"` -> `"2 cup"`, `2.5, "kg"` -> `"2.5 kg"`, `0.126, "l"` -> `"0.13 l"`.
pub fn format_quantity(quantity: f64, unit: &str) -> String {
    let amount = if quantity.fract() == 0.0 {
        format!("{}", quantity)
    } else {
        let fixed = format!("{:.2}", quantity);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    format!("{} {}", amount, unit)
}
