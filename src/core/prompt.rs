use crate::domain::model::DeliveryStop;
use serde_json::json;

/// Fixed depot every route starts from. Not user-editable at runtime.
pub const PHARMACY_ADDRESS: &str = "Shri Kripa Pharmacy, 123 Health Ave, Wellness City, 54321";

pub fn build_route_prompt(origin: &str, stops: &[DeliveryStop]) -> String {
    let delivery_details: Vec<String> = stops
        .iter()
        .map(|stop| format!("- Customer: {}, Address: {}", stop.patient_name, stop.address))
        .collect();

    format!(
        "You are an expert logistics coordinator for a pharmacy. Your task is to create the most efficient delivery route for a driver.\n\
         The delivery driver will start at the pharmacy's location.\n\
         \n\
         Pharmacy Location: {}\n\
         \n\
         Here is the list of deliveries to be made:\n\
         {}\n\
         \n\
         Please determine the most time-efficient order to visit these locations, starting from the pharmacy.\n\
         Return the result as a valid JSON array where each object contains the customer's name, their full address, and the optimized delivery order number (starting from 1).",
        origin,
        delivery_details.join("\n")
    )
}

/// Structured-output schema sent with every planning request: an array of
/// objects with all three fields required.
pub fn route_response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "customerName": {
                    "type": "STRING",
                    "description": "The name of the customer for the delivery.",
                },
                "address": {
                    "type": "STRING",
                    "description": "The full delivery address provided.",
                },
                "optimized_order": {
                    "type": "INTEGER",
                    "description": "The position in the optimized delivery sequence (e.g., 1, 2, 3...)."
                }
            },
            "required": ["customerName", "address", "optimized_order"],
        }
    })
}
