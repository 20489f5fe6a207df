pub mod analyze_menu;
pub mod get_providers;
