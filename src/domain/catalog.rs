//! Picker options for the trade input form. The first entry of each
//! placeholder list is the untouched sentinel.

use super::session::{
    CATEGORY_PLACEHOLDER, DEST_PLACEHOLDER, ORIGIN_PLACEHOLDER, TRANSPORT_PLACEHOLDER,
};

pub const CATEGORIES: [&str; 10] = [
    CATEGORY_PLACEHOLDER,
    "Electronics & IT",
    "Apparel & Textiles",
    "Machinery",
    "Chemicals",
    "Food & Beverage",
    "Automotive Parts",
    "Medical Devices",
    "Furniture",
    "Toys & Games",
];

pub const CURRENCIES: [&str; 6] = [
    "USD - US Dollar",
    "EUR - Euro",
    "GBP - Pound Sterling",
    "AED - UAE Dirham",
    "INR - Indian Rupee",
    "CNY - Chinese Yuan",
];

pub const TRANSPORTS: [&str; 6] = [
    TRANSPORT_PLACEHOLDER,
    "Sea Freight",
    "Air Freight",
    "Rail",
    "Road / Truck",
    "Multimodal",
];

pub const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Angola", "Argentina", "Armenia", "Australia", "Austria",
    "Azerbaijan", "Bahrain", "Bangladesh", "Belarus", "Belgium", "Bolivia",
    "Bosnia and Herzegovina", "Brazil", "Bulgaria", "Cambodia", "Cameroon", "Canada", "Chile",
    "China", "Colombia", "Costa Rica", "Croatia", "Cuba", "Czech Republic", "Denmark",
    "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Estonia", "Ethiopia", "Finland",
    "France", "Georgia", "Germany", "Ghana", "Greece", "Guatemala", "Honduras", "Hong Kong",
    "Hungary", "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Ivory Coast",
    "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kuwait", "Kyrgyzstan", "Latvia",
    "Lebanon", "Libya", "Lithuania", "Luxembourg", "Malaysia", "Malta", "Mexico", "Moldova",
    "Mongolia", "Morocco", "Mozambique", "Myanmar", "Nepal", "Netherlands", "New Zealand",
    "Nicaragua", "Nigeria", "North Korea", "Norway", "Oman", "Pakistan", "Panama", "Paraguay",
    "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Romania", "Russia", "Saudi Arabia",
    "Senegal", "Serbia", "Singapore", "Slovakia", "Slovenia", "South Africa", "South Korea",
    "Spain", "Sri Lanka", "Sudan", "Sweden", "Switzerland", "Syria", "Taiwan", "Tajikistan",
    "Tanzania", "Thailand", "Tunisia", "Turkey", "Turkmenistan", "UAE", "Uganda", "UK", "Ukraine",
    "Uruguay", "USA", "Uzbekistan", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

pub fn origins() -> impl Iterator<Item = &'static str> {
    std::iter::once(ORIGIN_PLACEHOLDER).chain(COUNTRIES.iter().copied())
}

pub fn destinations() -> impl Iterator<Item = &'static str> {
    std::iter::once(DEST_PLACEHOLDER).chain(COUNTRIES.iter().copied())
}

/// Options for a picker, with `current` appended when it came from somewhere
/// else (a parsed document, an older session) and is not in the list.
pub fn with_current(options: impl Iterator<Item = &'static str>, current: &str) -> Vec<String> {
    let mut list: Vec<String> = options.map(str::to_string).collect();
    if !current.trim().is_empty() && !list.iter().any(|option| option == current) {
        list.push(current.to_string());
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickers_start_with_placeholders() {
        assert_eq!(origins().next(), Some(ORIGIN_PLACEHOLDER));
        assert_eq!(destinations().nth(1), Some("Afghanistan"));
        assert_eq!(CATEGORIES[0], CATEGORY_PLACEHOLDER);
    }

    #[test]
    fn foreign_values_are_kept_selectable() {
        let list = with_current(TRANSPORTS.iter().copied(), "Courier");
        assert_eq!(list.last().map(String::as_str), Some("Courier"));
        let list = with_current(TRANSPORTS.iter().copied(), "Air Freight");
        assert_eq!(list.len(), TRANSPORTS.len());
    }

    #[test]
    fn session_owned_values_extend_country_pickers() {
        // The current value is borrowed from a session that lives shorter
        // than the static catalog.
        let origin = String::from("Atlantis");
        let list = with_current(origins(), &origin);
        assert_eq!(list.first().map(String::as_str), Some(ORIGIN_PLACEHOLDER));
        assert_eq!(list.last().map(String::as_str), Some("Atlantis"));

        let dest = String::from("India");
        let list = with_current(destinations(), &dest);
        assert_eq!(list.iter().filter(|d| d.as_str() == "India").count(), 1);
    }
}
