//! Institution name resolution for archive title blocks.
//!
//! Title blocks on the archive are free text such as
//! `"Speech by Mr Hans Tietmeyer, President of the Deutsche Bundesbank, ..."`.
//! The issuing institution is found by case-insensitive containment against
//! [`ROSTER`], and the match is folded through [`CORRECTIONS`] so that
//! every institution ends up under one canonical lowercase name.
//!
//! # Tie-break
//!
//! When several roster entries occur in the text, the one whose first
//! occurrence starts earliest wins; an exact tie goes to the entry listed
//! first in [`ROSTER`]. Shorter names that are substrings of unrelated
//! longer ones (e.g. "Bank of China" inside "Agricultural Bank of China")
//! still match.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

/// Institutions recognized in title blocks, in tie-break order.
///
/// Contains official names alongside the alternative spellings, legacy
/// names and typos that appear on the archive.
pub const ROSTER: &[&str] = &[
    "People's Bank of China",
    "Bank Indonesia",
    "Bank of Albania",
    "Bank of Algeria",
    "Bank of Botswana",
    "Bank of Canada",
    "Bank of England",
    "Bank of Estonia",
    "Bank of Finland",
    "Bank of France",
    "Bank of Ghana",
    "Bank of Greece",
    "Bank of Guatemala",
    "Bank of Guyana",
    "Bank of Israel",
    "Bank of Italy",
    "Bank of Jamaica",
    "Bank of Japan",
    "Bank of Korea",
    "Bank of Latvia",
    "Bank of Lithuania",
    "Bank of Mauritius",
    "Bank of Mexico",
    "Bank of Morocco",
    "Bank of Mozambique",
    "Bank of Namibia",
    "Bank of Papua New Guinea",
    "Bank of Portugal",
    "Bank of Sierra Leone",
    "Bank of Slovenia",
    "Bank of Spain",
    "Bank of Tanzania",
    "Bank of Thailand",
    "Bank of Uganda",
    "Bank of Zambia",
    "Board of Governors of the Federal Reserve System",
    "Bulgarian National Bank",
    "Central Bank of Argentina",
    "Central Bank of Aruba",
    "Central Bank of Bahrain",
    "Central Bank of Barbados",
    "Central Bank of Belize",
    "Central Bank of Bolivia",
    "Central Bank of Bosnia and Herzegovina",
    "Central Bank of Brazil",
    "Central Bank of Chile",
    "Central Bank of Colombia",
    "Central Bank of Curaçao and Sint Maarten",
    "Central Bank of Cyprus",
    "Central Bank of Iceland",
    "Central Bank of Ireland",
    "Central Bank of Jordan",
    "Central Bank of Kenya",
    "Central Bank of Kuwait",
    "Central Bank of Luxembourg",
    "Central Bank of Malaysia",
    "Central Bank of Malta",
    "Central Bank of Nepal",
    "Central Bank of Nigeria",
    "Central Bank of Norway",
    "Central Bank of Samoa",
    "Central Bank of Seychelles",
    "Central Bank of Solomon Islands",
    "Central Bank of Sri Lanka",
    "Central Bank of The Bahamas",
    "Central Bank of Trinidad and Tobago",
    "Central Bank of Uruguay",
    "central bank of the Philippines",
    "Central Bank of the Republic of Kosovo",
    "Central Bank of the Republic of Turkey",
    "Bank of Russia",
    "Central Bank of the United Arab Emirates",
    "Croatian National Bank",
    "Czech National Bank",
    "National Bank of Denmark",
    "Deutsche Bundesbank",
    "Eastern Caribbean Central Bank",
    "European Central Bank",
    "Federal Reserve Bank of Atlanta",
    "Federal Reserve Bank of Boston",
    "Federal Reserve Bank of Chicago",
    "Federal Reserve Bank of Dallas",
    "Federal Reserve Bank of Kansas City",
    "Federal Reserve Bank of Minneapolis",
    "Federal Reserve Bank of New York",
    "Federal Reserve Bank of Philadelphia",
    "Federal Reserve Bank of Richmond",
    "Federal Reserve Bank of San Francisco",
    "Hong Kong Monetary Authority",
    "central bank of Hungary",
    "Maldives Monetary Authority",
    "Monetary Authority of Macao",
    "Monetary Authority of Singapore",
    "National Bank of Belgium",
    "National Bank of Cambodia",
    "National Bank of Romania",
    "National Bank of Serbia",
    "National Bank of Slovakia",
    "National Bank of Ukraine",
    "Central Bank of the Republic of Austria",
    "National Bank of North Macedonia",
    "Netherlands Bank",
    "Reserve Bank of Australia",
    "Reserve Bank of Fiji",
    "Reserve Bank of India",
    "Reserve Bank of Malawi",
    "Reserve Bank of New Zealand",
    "Reserve Bank of Vanuatu",
    "Saudi Arabian Monetary Agency",
    "South African Reserve Bank",
    "State Bank of Pakistan",
    "Sveriges Riksbank",
    "Swiss National Bank",
    "Board of Governors of the US Federal Reserve System",
    "Bank of Sweden",
    "Board of the US Federal Reserve System",
    "US Federal Reserve System",
    "European Monetary Institute",
    "Bank for International Settlements",
    "Norges Bank",
    "Board of Governors of the US Federal Reserve",
    "Nederlandsche Bank",
    "Banque de France",
    "International Monetary Fund",
    "Austrian National Bank",
    "Governors of the U.S. Federal Reserve System",
    "Swedish Central Bank",
    "Board of the U S Federal Reserve System",
    "Bank of South Africa",
    "Banque nationale suisse",
    "Hong Kong Monetary",
    "Oesterreichische Nationalbank",
    "Sveriges Riskbank",
    "Bank of India",
    "National Bank of the Republic of Macedonia",
    "National Bank of the Republic of North Macedonia",
    "ECB",
    "Authority of Ireland",
    "Bank of Turkey",
    "Bank of Poland",
    "Bank of China",
    "Board of Governors of the federal reserve",
    "Board of governors of the us fed",
    "Australian Reserve Bank",
    "Sveriges Risksbank",
    "Federal Reserve Board",
    "Austrian Nationalbank",
    "Bank of Australia",
    "Board of Governors of the US Fed",
    "Federal Reserve System",
];

const FEDERAL_RESERVE: &str = "board of governors of the federal reserve system";
const RIKSBANK: &str = "sveriges riksbank";
const AUSTRIA: &str = "central bank of the republic of austria";
const NORTH_MACEDONIA: &str = "national bank of north macedonia";

/// Many-to-one folding of lowercase aliases onto canonical names.
///
/// Canonical names also map onto themselves, so folding twice is the same
/// as folding once.
pub const CORRECTIONS: &[(&str, &str)] = &[
    // United States
    ("board of governors of the federal reserve system", FEDERAL_RESERVE),
    ("board of governors of the us federal reserve system", FEDERAL_RESERVE),
    ("board of the us federal reserve system", FEDERAL_RESERVE),
    ("us federal reserve system", FEDERAL_RESERVE),
    ("board of governors of the us federal reserve", FEDERAL_RESERVE),
    ("governors of the u.s. federal reserve system", FEDERAL_RESERVE),
    ("board of the u s federal reserve system", FEDERAL_RESERVE),
    ("board of governors of the federal reserve", FEDERAL_RESERVE),
    ("board of governors of the us fed", FEDERAL_RESERVE),
    ("federal reserve board", FEDERAL_RESERVE),
    ("federal reserve system", FEDERAL_RESERVE),
    // Sweden
    ("sveriges riksbank", RIKSBANK),
    ("bank of sweden", RIKSBANK),
    ("sveriges riskbank", RIKSBANK),
    ("swedish central bank", RIKSBANK),
    ("sveriges risksbank", RIKSBANK),
    // Austria
    ("central bank of the republic of austria", AUSTRIA),
    ("austrian national bank", AUSTRIA),
    ("oesterreichische nationalbank", AUSTRIA),
    ("austrian nationalbank", AUSTRIA),
    // North Macedonia
    ("national bank of the republic of macedonia", NORTH_MACEDONIA),
    ("national bank of the republic of north macedonia", NORTH_MACEDONIA),
    ("norges bank", "central bank of norway"),
    ("banque de france", "bank of france"),
    ("nederlandsche bank", "netherlands bank"),
    ("bank of south africa", "south african reserve bank"),
    ("hong kong monetary", "hong kong monetary authority"),
    ("bank of india", "reserve bank of india"),
    ("ecb", "european central bank"),
    ("authority of ireland", "central bank of ireland"),
    ("bank of turkey", "central bank of the republic of turkey"),
    ("bank of china", "people's bank of china"),
    ("australian reserve bank", "reserve bank of australia"),
    ("bank of australia", "reserve bank of australia"),
];

/// Country (or currency area) of each canonical institution.
///
/// Institutions missing here have no country and are left out of the
/// country-level panel.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("central bank of argentina", "Argentina"),
    ("reserve bank of australia", "Australia"),
    (AUSTRIA, "Austria"),
    ("national bank of belgium", "Belgium"),
    ("central bank of bolivia", "Bolivia"),
    ("central bank of brazil", "Brazil"),
    ("bulgarian national bank", "Bulgaria"),
    ("bank of canada", "Canada"),
    ("central bank of chile", "Chile"),
    ("people's bank of china", "China"),
    ("central bank of colombia", "Colombia"),
    ("croatian national bank", "Croatia"),
    ("central bank of cyprus", "Cyprus"),
    ("czech national bank", "Czech Republic"),
    ("national bank of denmark", "Denmark"),
    ("central bank of ecuador", "Ecuador"),
    ("central bank of egypt", "Egypt"),
    ("bank of estonia", "Estonia"),
    ("bank of finland", "Finland"),
    ("bank of france", "France"),
    ("deutsche bundesbank", "Germany"),
    ("bank of greece", "Greece"),
    ("central bank of hungary", "Hungary"),
    ("central bank of iceland", "Iceland"),
    ("reserve bank of india", "India"),
    ("bank indonesia", "Indonesia"),
    ("central bank of ireland", "Ireland"),
    ("bank of israel", "Israel"),
    ("bank of italy", "Italy"),
    ("bank of japan", "Japan"),
    ("bank of latvia", "Latvia"),
    ("bank of lithuania", "Lithuania"),
    ("central bank of luxembourg", "Luxembourg"),
    ("central bank of malaysia", "Malaysia"),
    ("central bank of malta", "Malta"),
    ("bank of mexico", "Mexico"),
    ("netherlands bank", "Netherlands"),
    ("reserve bank of new zealand", "New Zealand"),
    ("central bank of norway", "Norway"),
    ("central bank of paraguay", "Paraguay"),
    ("central reserve bank of peru", "Peru"),
    ("central bank of the philippines", "Philippines"),
    ("bank of poland", "Poland"),
    ("bank of portugal", "Portugal"),
    ("national bank of romania", "Romania"),
    ("bank of russia", "Russia"),
    ("national bank of slovakia", "Slovakia"),
    ("bank of slovenia", "Slovenia"),
    ("south african reserve bank", "South Africa"),
    ("bank of korea", "South Korea"),
    ("bank of spain", "Spain"),
    (RIKSBANK, "Sweden"),
    ("swiss national bank", "Switzerland"),
    ("bank of thailand", "Thailand"),
    ("central bank of the republic of turkey", "Turkey"),
    ("bank of england", "United Kingdom"),
    (FEDERAL_RESERVE, "United States"),
    ("federal reserve bank of kansas city", "United States"),
    ("federal reserve bank of new york", "United States"),
    ("federal reserve bank of san francisco", "United States"),
    ("federal reserve bank of boston", "United States"),
    ("federal reserve bank of chicago", "United States"),
    ("federal reserve bank of dallas", "United States"),
    ("federal reserve bank of minneapolis", "United States"),
    ("federal reserve bank of philadelphia", "United States"),
    ("federal reserve bank of atlanta", "United States"),
    ("federal reserve bank of richmond", "United States"),
    ("central bank of uruguay", "Uruguay"),
    ("central bank of venezuela", "Venezuela"),
    ("european central bank", "ECB"),
];

static LOWER_ROSTER: Lazy<Vec<String>> =
    Lazy::new(|| ROSTER.iter().map(|name| name.to_lowercase()).collect());

static CORRECTION_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CORRECTIONS.iter().copied().collect());

static COUNTRY_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRIES.iter().copied().collect());

/// Outcome of resolving a title block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical lowercase institution name.
    Resolved(String),
    /// No roster entry occurs in the text.
    Unresolved,
}

impl Resolution {
    /// The canonical name, or `fallback` when unresolved.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Resolution::Resolved(name) => name,
            Resolution::Unresolved => fallback,
        }
    }
}

/// Fold a lowercase institution name onto its canonical form.
pub fn canonicalize(name: &str) -> &str {
    CORRECTION_MAP.get(name).copied().unwrap_or(name)
}

/// Country of a canonical institution name, if it has one.
pub fn country_of(institution: &str) -> Option<&'static str> {
    COUNTRY_MAP.get(institution).copied()
}

/// Determine which institution issued a speech from its title block.
pub fn resolve(text: &str) -> Resolution {
    let haystack = text.to_lowercase();

    // (offset of first occurrence, roster index)
    let best = LOWER_ROSTER
        .iter()
        .enumerate()
        .filter_map(|(index, name)| haystack.find(name.as_str()).map(|offset| (offset, index)))
        .min();

    match best {
        Some((offset, index)) => {
            let matched = LOWER_ROSTER[index].as_str();
            let canonical = canonicalize(matched);
            debug!(matched, canonical, offset, "Resolved institution");
            Resolution::Resolved(canonical.to_string())
        }
        None => {
            debug!(text, "No institution found in title");
            Resolution::Unresolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(name: &str) -> Resolution {
        Resolution::Resolved(name.to_string())
    }

    #[test]
    fn test_single_match() {
        assert_eq!(
            resolve("Remarks by J. Doe, Deutsche Bundesbank, Frankfurt"),
            resolved("deutsche bundesbank")
        );
    }

    #[test]
    fn test_no_match_is_unresolved() {
        let resolution = resolve("Keynote address at the annual conference");
        assert_eq!(resolution, Resolution::Unresolved);
        assert_eq!(resolution.name_or("NA"), "NA");
    }

    #[test]
    fn test_earliest_occurrence_wins() {
        let text = "Speech by the President of the Federal Reserve Bank of Richmond, \
                    before joining the Federal Reserve Board";
        assert_eq!(resolve(text), resolved("federal reserve bank of richmond"));

        let text = "Governor of the Federal Reserve Board, at the Federal Reserve Bank of Richmond";
        assert_eq!(resolve(text), resolved(FEDERAL_RESERVE));
    }

    #[test]
    fn test_tie_goes_to_roster_order() {
        // "Hong Kong Monetary" and "Hong Kong Monetary Authority" start at the
        // same offset; the full name is listed first.
        assert_eq!(
            resolve("Chief Executive of the Hong Kong Monetary Authority"),
            resolved("hong kong monetary authority")
        );
    }

    #[test]
    fn test_swedish_aliases_fold() {
        for text in [
            "Speech at Sveriges Riksbank",
            "Speech at the Bank of Sweden",
            "Speech at Sveriges Riskbank",
            "Speech at the Swedish Central Bank",
        ] {
            assert_eq!(resolve(text), resolved(RIKSBANK), "{text}");
        }
    }

    #[test]
    fn test_federal_reserve_phrasings_fold() {
        for text in [
            "Chairman of the Board of Governors of the US Federal Reserve System",
            "Member of the Board of Governors of the US Fed",
            "Governor, Federal Reserve Board",
            "Vice Chair of the Federal Reserve System",
        ] {
            assert_eq!(resolve(text), resolved(FEDERAL_RESERVE), "{text}");
        }
    }

    #[test]
    fn test_other_corrections() {
        assert_eq!(resolve("Governor of Norges Bank"), resolved("central bank of norway"));
        assert_eq!(resolve("Governor, Banque de France"), resolved("bank of france"));
        assert_eq!(resolve("President of the ECB"), resolved("european central bank"));
        assert_eq!(
            resolve("Governor of the National Bank of the Republic of Macedonia"),
            resolved(NORTH_MACEDONIA)
        );
        assert_eq!(
            resolve("Governor of the Oesterreichische Nationalbank"),
            resolved(AUSTRIA)
        );
        assert_eq!(
            resolve("Central Bank and Financial Services Authority of Ireland"),
            resolved("central bank of ireland")
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for (alias, _) in CORRECTIONS {
            let once = canonicalize(alias);
            assert_eq!(canonicalize(once), once, "{alias}");
        }
        assert_eq!(canonicalize("bank of japan"), "bank of japan");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let text = "Speech by the Governor of the Bank of England at the European Central Bank";
        let first = resolve(text);
        for _ in 0..10 {
            assert_eq!(resolve(text), first);
        }
        assert_eq!(first, resolved("bank of england"));
    }

    #[test]
    fn test_substring_alias_misfire_is_preserved() {
        // Known limitation: a roster name nested inside an unrelated
        // institution's name still matches.
        assert_eq!(
            resolve("Chairman of the Agricultural Bank of China"),
            resolved("people's bank of china")
        );
    }

    #[test]
    fn test_regional_fed_banks_map_to_united_states() {
        assert_eq!(country_of("federal reserve bank of richmond"), Some("United States"));
        assert_eq!(country_of("federal reserve bank of kansas city"), Some("United States"));
        assert_eq!(country_of(FEDERAL_RESERVE), Some("United States"));
    }

    #[test]
    fn test_country_of_canonical_names() {
        assert_eq!(country_of(canonicalize("norges bank")), Some("Norway"));
        assert_eq!(country_of(canonicalize("ecb")), Some("ECB"));
        assert_eq!(country_of("hong kong monetary authority"), None);
        assert_eq!(country_of("NA"), None);
    }

    #[test]
    fn test_every_country_entry_is_canonical() {
        for (institution, _) in COUNTRIES {
            assert_eq!(canonicalize(institution), *institution, "{institution}");
        }
    }
}
