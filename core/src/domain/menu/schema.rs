use serde_json::json;

/// Returns the JSON schema for menu analysis LLM responses
pub fn get_menu_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "is_menu": { "type": "boolean" },
            "dishes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "original_name": { "type": "string" },
                        "translated_name": { "type": "string" },
                        "description": { "type": "string" },
                        "spiciness": { "type": "integer", "minimum": 1, "maximum": 5 },
                        "sweetness": { "type": "integer", "minimum": 1, "maximum": 5 },
                        "ingredients": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "allergens": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "category": {
                            "type": "string",
                            "enum": ["appetizer", "main", "dessert", "beverage", "other"]
                        },
                        "price_range": {
                            "type": "string",
                            "enum": ["$", "$$", "$$$", "$$$$"],
                            "nullable": true
                        }
                    },
                    "required": [
                        "original_name", "translated_name", "description",
                        "spiciness", "sweetness", "ingredients", "allergens", "category"
                    ]
                }
            }
        },
        "required": ["is_menu", "dishes"]
    })
}
