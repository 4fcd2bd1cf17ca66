pub mod confidence_badge;
pub mod kpi_card;
pub mod status_banner;
pub mod step_prompt;
pub mod toast;
pub mod trade_summary;
