// Data structures shared by the controller, the API client and the page.

use serde::{Deserialize, Serialize};

// One row returned by the keyword-metrics API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub avg_monthly_searches: u64, // Negative counts fail to decode
    pub competition: String, // Label set is owned by the API (LOW, MEDIUM, HIGH, ...)
}

/// Which tab of the form is active. Decides the validation rule, the
/// request shape and the error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Bulk,
}

impl Mode {
    pub fn empty_input_message(self) -> &'static str {
        match self {
            Mode::Single => "Please enter a keyword",
            Mode::Bulk => "Please enter at least one keyword",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Mode::Single => "Failed to fetch keyword data. Please try again.",
            Mode::Bulk => "Failed to analyze keywords. Please try again.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Bulk => "bulk",
        }
    }
}

// Supported geo targets, serialized as their two-letter codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "GB")]
    UnitedKingdom,
    #[serde(rename = "AU")]
    Australia,
    #[serde(rename = "CA")]
    Canada,
    #[serde(rename = "VN")]
    Vietnam,
    #[serde(rename = "IN")]
    India,
    #[serde(rename = "SG")]
    Singapore,
    #[serde(rename = "MY")]
    Malaysia,
}

impl Country {
    // Display order of the country selector
    pub const ALL: [Country; 8] = [
        Country::UnitedStates,
        Country::UnitedKingdom,
        Country::Australia,
        Country::Canada,
        Country::Vietnam,
        Country::India,
        Country::Singapore,
        Country::Malaysia,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Country::UnitedStates => "US",
            Country::UnitedKingdom => "GB",
            Country::Australia => "AU",
            Country::Canada => "CA",
            Country::Vietnam => "VN",
            Country::India => "IN",
            Country::Singapore => "SG",
            Country::Malaysia => "MY",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Australia => "Australia",
            Country::Canada => "Canada",
            Country::Vietnam => "Vietnam",
            Country::India => "India",
            Country::Singapore => "Singapore",
            Country::Malaysia => "Malaysia",
        }
    }
}

// Supported languages, serialized as the API's numeric language constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "1000")]
    English,
    #[serde(rename = "1005")]
    Vietnamese,
    #[serde(rename = "1002")]
    French,
    #[serde(rename = "1001")]
    German,
    #[serde(rename = "1003")]
    Spanish,
    #[serde(rename = "1004")]
    Chinese,
    #[serde(rename = "1006")]
    Japanese,
    #[serde(rename = "1007")]
    Korean,
}

impl Language {
    // Display order of the language selector
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Vietnamese,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "1000",
            Language::Vietnamese => "1005",
            Language::French => "1002",
            Language::German => "1001",
            Language::Spanish => "1003",
            Language::Chinese => "1004",
            Language::Japanese => "1006",
            Language::Korean => "1007",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Vietnamese => "Vietnamese",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
        }
    }
}

// Country and language sent along with every lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub country: Country,
    pub language: Language,
}

// Query string of the single-keyword lookup
#[derive(Debug, Serialize)]
pub struct SingleKeywordQuery<'a> {
    pub keyword: &'a str,
    pub country: Country,
    pub language: Language,
}

// JSON body of the bulk lookup
#[derive(Debug, Serialize)]
pub struct BulkKeywordRequest<'a> {
    pub keywords: &'a [String],
    pub country: Country,
    pub language: Language,
}

// Entry of the lookup tables served at /api/options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub name: &'static str,
    pub code: &'static str,
}
