pub mod chart_service;
pub mod card_service;
pub mod view_service;
