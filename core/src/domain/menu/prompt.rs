/// Builds the fixed extraction prompt sent with every menu image.
pub fn build_menu_prompt(target_language: &str) -> String {
    format!(
        r#"This image is a restaurant menu. For every dish in the image, extract the following information as JSON.

For each dish include:
- original_name: the dish name exactly as written on the menu
- translated_name: the dish name translated into {language}
- description: a short description of the dish in {language} (about one sentence)
- spiciness: spiciness level, an integer from 1 to 5 (1 = not spicy, 5 = very spicy)
- sweetness: sweetness level, an integer from 1 to 5 (1 = not sweet, 5 = very sweet)
- ingredients: list of the main ingredients, in {language}
- allergens: list of likely allergens, in {language} (egg, dairy, wheat, buckwheat, peanuts, shrimp, crab, ...)
- category: one of "appetizer", "main", "dessert", "beverage", "other"
- price_range: one of "$", "$$", "$$$", "$$$$", or null when it cannot be determined

Answer with this JSON structure:
{{
  "is_menu": true,
  "dishes": [
    {{
      "original_name": "Pad Thai",
      "translated_name": "Pad Thai (stir-fried rice noodles)",
      "description": "Thai stir-fried rice noodles with shrimp, egg, bean sprouts and peanuts",
      "spiciness": 2,
      "sweetness": 3,
      "ingredients": ["rice noodles", "shrimp", "egg", "bean sprouts", "peanuts"],
      "allergens": ["shellfish", "egg", "nuts"],
      "category": "main",
      "price_range": "$$"
    }}
  ]
}}

Rules:
- spiciness and sweetness must always be integers from 1 to 5
- use an empty list for ingredients or allergens when unknown
- use null for price_range when it cannot be determined
- if the image is not a restaurant menu, answer {{"is_menu": false, "dishes": []}}
- output valid JSON only, with no other text"#,
        language = target_language
    )
}
