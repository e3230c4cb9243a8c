// Data structures shared by the inventory, filter and API layers

use serde::{Deserialize, Deserializer, Serialize};

// A single listing as stored in the `cars` table.
// Column names are snake_case in the data store, so no rename_all here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub price: u32, // Whole currency units, as the price presets assume
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>, // Listing order, first image is the card image
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
}

impl Vehicle {
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

// `images` is a nullable array column
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// The inventory as fetched at one point in time. Replaced wholesale on refresh.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub vehicles: Vec<Vehicle>,
}

impl Snapshot {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}

// Car summary the site may send along with an enquiry when it has no id
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CarDetails {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
}

// Enquiry / test-drive form payload
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")] // Match JavaScript frontend keys
pub struct EnquiryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub car_id: Option<String>,
    pub car_details: Option<CarDetails>,
}

impl EnquiryRequest {
    pub fn is_test_drive(&self) -> bool {
        self.kind.as_deref() == Some("test-drive")
    }

    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_decodes_store_row() {
        let row = r#"{
            "id": "b7d1", "make": "BMW", "model": "M3", "year": 2021,
            "mileage": 12000, "price": 54995, "images": null,
            "fuel_type": "Petrol", "transmission": null, "colour": "Black"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(row).unwrap();
        assert!(vehicle.images.is_empty());
        assert_eq!(vehicle.fuel_type.as_deref(), Some("Petrol"));
        assert_eq!(vehicle.transmission, None);
        assert_eq!(vehicle.body_type, None);
        assert_eq!(vehicle.title(), "2021 BMW M3");
    }

    #[test]
    fn test_enquiry_required_fields() {
        let mut req: EnquiryRequest =
            serde_json::from_str(r#"{"name":"Sam","email":"sam@example.com","type":"test-drive"}"#).unwrap();
        assert!(req.is_test_drive());
        assert!(!req.has_required_fields());
        req.phone = "07700 900000".to_string();
        assert!(req.has_required_fields());
    }
}
