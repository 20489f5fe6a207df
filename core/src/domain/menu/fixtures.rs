use base64::{Engine as _, engine::general_purpose};

/// A 1x1 red PNG.
pub fn png_pixel() -> Vec<u8> {
    general_purpose::STANDARD
        .decode("iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==")
        .expect("valid base64")
}

pub fn jpeg_header() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    data.resize(64, 0);
    data
}

pub fn webp_header() -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"WEBPVP8 ");
    data.resize(64, 0);
    data
}

/// Two well-formed dishes, as a provider would answer.
pub const TWO_DISHES: &str = r#"{
  "is_menu": true,
  "dishes": [
    {
      "original_name": "Pad Thai",
      "translated_name": "Stir-fried rice noodles",
      "description": "Thai rice noodles with shrimp, egg, bean sprouts and peanuts",
      "spiciness": 2,
      "sweetness": 3,
      "ingredients": ["rice noodles", "shrimp", "egg", "bean sprouts", "peanuts"],
      "allergens": ["shellfish", "egg", "nuts"],
      "category": "main",
      "price_range": "$$"
    },
    {
      "original_name": "Tom Yum Goong",
      "translated_name": "Spicy shrimp soup",
      "description": "Hot and sour Thai shrimp soup",
      "spiciness": 4,
      "sweetness": 1,
      "ingredients": ["shrimp", "lemongrass", "lime", "chili"],
      "allergens": ["shellfish"],
      "category": "appetizer",
      "price_range": "$$$"
    }
  ]
}"#;
