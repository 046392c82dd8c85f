//! Static lookups between two-letter region codes, the three-digit numeric
//! ids used by the boundary dataset, and display names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Code used by the backend for visitors it could not attribute to a country.
pub const UNKNOWN_CODE: &str = "XX";

/// Glyph shown when a code has no flag.
pub const UNKNOWN_GLYPH: &str = "\u{1F30D}";

/// Name shown for numeric ids that do not resolve to a code.
pub const UNKNOWN_NAME: &str = "Unknown";

const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

const NUMERIC_IDS: &[(&str, &str)] = &[
    ("AF", "004"), ("AL", "008"), ("DZ", "012"), ("AS", "016"), ("AD", "020"), ("AO", "024"),
    ("AG", "028"), ("AR", "032"), ("AM", "051"), ("AU", "036"), ("AT", "040"), ("AZ", "031"),
    ("BS", "044"), ("BH", "048"), ("BD", "050"), ("BB", "052"), ("BY", "112"), ("BE", "056"),
    ("BZ", "084"), ("BJ", "204"), ("BT", "064"), ("BO", "068"), ("BA", "070"), ("BW", "072"),
    ("BR", "076"), ("BN", "096"), ("BG", "100"), ("BF", "854"), ("BI", "108"), ("CV", "132"),
    ("KH", "116"), ("CM", "120"), ("CA", "124"), ("CF", "140"), ("TD", "148"), ("CL", "152"),
    ("CN", "156"), ("CO", "170"), ("KM", "174"), ("CD", "180"), ("CG", "178"), ("CR", "188"),
    ("CI", "384"), ("HR", "191"), ("CU", "192"), ("CY", "196"), ("CZ", "203"), ("DK", "208"),
    ("DJ", "262"), ("DM", "212"), ("DO", "214"), ("EC", "218"), ("EG", "818"), ("SV", "222"),
    ("GQ", "226"), ("ER", "232"), ("EE", "233"), ("SZ", "748"), ("ET", "231"), ("FJ", "242"),
    ("FI", "246"), ("FR", "250"), ("GA", "266"), ("GM", "270"), ("GE", "268"), ("DE", "276"),
    ("GH", "288"), ("GR", "300"), ("GD", "308"), ("GT", "320"), ("GN", "324"), ("GW", "624"),
    ("GY", "328"), ("HT", "332"), ("HN", "340"), ("HU", "348"), ("IS", "352"), ("IN", "356"),
    ("ID", "360"), ("IR", "364"), ("IQ", "368"), ("IE", "372"), ("IL", "376"), ("IT", "380"),
    ("JM", "388"), ("JP", "392"), ("JO", "400"), ("KZ", "398"), ("KE", "404"), ("KI", "296"),
    ("KP", "408"), ("KR", "410"), ("KW", "414"), ("KG", "417"), ("LA", "418"), ("LV", "428"),
    ("LB", "422"), ("LS", "426"), ("LR", "430"), ("LY", "434"), ("LI", "438"), ("LT", "440"),
    ("LU", "442"), ("MG", "450"), ("MW", "454"), ("MY", "458"), ("MV", "462"), ("ML", "466"),
    ("MT", "470"), ("MH", "584"), ("MR", "478"), ("MU", "480"), ("MX", "484"), ("FM", "583"),
    ("MD", "498"), ("MC", "492"), ("MN", "496"), ("ME", "499"), ("MA", "504"), ("MZ", "508"),
    ("MM", "104"), ("NA", "516"), ("NR", "520"), ("NP", "524"), ("NL", "528"), ("NZ", "554"),
    ("NI", "558"), ("NE", "562"), ("NG", "566"), ("MK", "807"), ("NO", "578"), ("OM", "512"),
    ("PK", "586"), ("PW", "585"), ("PA", "591"), ("PG", "598"), ("PY", "600"), ("PE", "604"),
    ("PH", "608"), ("PL", "616"), ("PT", "620"), ("QA", "634"), ("RO", "642"), ("RU", "643"),
    ("RW", "646"), ("KN", "659"), ("LC", "662"), ("VC", "670"), ("WS", "882"), ("SM", "674"),
    ("ST", "678"), ("SA", "682"), ("SN", "686"), ("RS", "688"), ("SC", "690"), ("SL", "694"),
    ("SG", "702"), ("SK", "703"), ("SI", "705"), ("SB", "090"), ("SO", "706"), ("ZA", "710"),
    ("SS", "728"), ("ES", "724"), ("LK", "144"), ("SD", "729"), ("SR", "740"), ("SE", "752"),
    ("CH", "756"), ("SY", "760"), ("TW", "158"), ("TJ", "762"), ("TZ", "834"), ("TH", "764"),
    ("TL", "626"), ("TG", "768"), ("TO", "776"), ("TT", "780"), ("TN", "788"), ("TR", "792"),
    ("TM", "795"), ("TV", "798"), ("UG", "800"), ("UA", "804"), ("AE", "784"), ("GB", "826"),
    ("US", "840"), ("UY", "858"), ("UZ", "860"), ("VU", "548"), ("VE", "862"), ("VN", "704"),
    ("YE", "887"), ("ZM", "894"), ("ZW", "716"), ("XK", "383"), ("PS", "275"), ("EH", "732"),
    ("TF", "260"), ("GL", "304"), ("NC", "540"), ("PR", "630"), ("FK", "238"), ("GF", "254"),
    ("PF", "258"), ("HK", "344"), ("MO", "446"),
];

const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("AF", "Afghanistan"), ("AL", "Albania"), ("DZ", "Algeria"), ("AD", "Andorra"),
    ("AO", "Angola"), ("AG", "Antigua & Barbuda"), ("AR", "Argentina"), ("AM", "Armenia"),
    ("AU", "Australia"), ("AT", "Austria"), ("AZ", "Azerbaijan"), ("BS", "Bahamas"),
    ("BH", "Bahrain"), ("BD", "Bangladesh"), ("BB", "Barbados"), ("BY", "Belarus"),
    ("BE", "Belgium"), ("BZ", "Belize"), ("BJ", "Benin"), ("BT", "Bhutan"), ("BO", "Bolivia"),
    ("BA", "Bosnia & Herz."), ("BW", "Botswana"), ("BR", "Brazil"), ("BN", "Brunei"),
    ("BG", "Bulgaria"), ("BF", "Burkina Faso"), ("BI", "Burundi"), ("CV", "Cabo Verde"),
    ("KH", "Cambodia"), ("CM", "Cameroon"), ("CA", "Canada"), ("CF", "Central African Rep."),
    ("TD", "Chad"), ("CL", "Chile"), ("CN", "China"), ("CO", "Colombia"), ("KM", "Comoros"),
    ("CD", "DR Congo"), ("CG", "Congo"), ("CR", "Costa Rica"), ("CI", "Côte d'Ivoire"),
    ("HR", "Croatia"), ("CU", "Cuba"), ("CY", "Cyprus"), ("CZ", "Czechia"), ("DK", "Denmark"),
    ("DJ", "Djibouti"), ("DM", "Dominica"), ("DO", "Dominican Rep."), ("EC", "Ecuador"),
    ("EG", "Egypt"), ("SV", "El Salvador"), ("GQ", "Eq. Guinea"), ("ER", "Eritrea"),
    ("EE", "Estonia"), ("SZ", "Eswatini"), ("ET", "Ethiopia"), ("FJ", "Fiji"), ("FI", "Finland"),
    ("FR", "France"), ("GA", "Gabon"), ("GM", "Gambia"), ("GE", "Georgia"), ("DE", "Germany"),
    ("GH", "Ghana"), ("GR", "Greece"), ("GD", "Grenada"), ("GT", "Guatemala"), ("GN", "Guinea"),
    ("GW", "Guinea-Bissau"), ("GY", "Guyana"), ("HT", "Haiti"), ("HN", "Honduras"),
    ("HU", "Hungary"), ("IS", "Iceland"), ("IN", "India"), ("ID", "Indonesia"), ("IR", "Iran"),
    ("IQ", "Iraq"), ("IE", "Ireland"), ("IL", "Israel"), ("IT", "Italy"), ("JM", "Jamaica"),
    ("JP", "Japan"), ("JO", "Jordan"), ("KZ", "Kazakhstan"), ("KE", "Kenya"), ("KI", "Kiribati"),
    ("KP", "North Korea"), ("KR", "South Korea"), ("KW", "Kuwait"), ("KG", "Kyrgyzstan"),
    ("LA", "Laos"), ("LV", "Latvia"), ("LB", "Lebanon"), ("LS", "Lesotho"), ("LR", "Liberia"),
    ("LY", "Libya"), ("LI", "Liechtenstein"), ("LT", "Lithuania"), ("LU", "Luxembourg"),
    ("MG", "Madagascar"), ("MW", "Malawi"), ("MY", "Malaysia"), ("MV", "Maldives"), ("ML", "Mali"),
    ("MT", "Malta"), ("MH", "Marshall Is."), ("MR", "Mauritania"), ("MU", "Mauritius"),
    ("MX", "Mexico"), ("FM", "Micronesia"), ("MD", "Moldova"), ("MC", "Monaco"),
    ("MN", "Mongolia"), ("ME", "Montenegro"), ("MA", "Morocco"), ("MZ", "Mozambique"),
    ("MM", "Myanmar"), ("NA", "Namibia"), ("NR", "Nauru"), ("NP", "Nepal"), ("NL", "Netherlands"),
    ("NZ", "New Zealand"), ("NI", "Nicaragua"), ("NE", "Niger"), ("NG", "Nigeria"),
    ("MK", "North Macedonia"), ("NO", "Norway"), ("OM", "Oman"), ("PK", "Pakistan"),
    ("PW", "Palau"), ("PA", "Panama"), ("PG", "Papua New Guinea"), ("PY", "Paraguay"),
    ("PE", "Peru"), ("PH", "Philippines"), ("PL", "Poland"), ("PT", "Portugal"), ("QA", "Qatar"),
    ("RO", "Romania"), ("RU", "Russia"), ("RW", "Rwanda"), ("KN", "St. Kitts & Nevis"),
    ("LC", "St. Lucia"), ("VC", "St. Vincent"), ("WS", "Samoa"), ("SM", "San Marino"),
    ("ST", "São Tomé & Príncipe"), ("SA", "Saudi Arabia"), ("SN", "Senegal"), ("RS", "Serbia"),
    ("SC", "Seychelles"), ("SL", "Sierra Leone"), ("SG", "Singapore"), ("SK", "Slovakia"),
    ("SI", "Slovenia"), ("SB", "Solomon Is."), ("SO", "Somalia"), ("ZA", "South Africa"),
    ("SS", "South Sudan"), ("ES", "Spain"), ("LK", "Sri Lanka"), ("SD", "Sudan"),
    ("SR", "Suriname"), ("SE", "Sweden"), ("CH", "Switzerland"), ("SY", "Syria"), ("TW", "Taiwan"),
    ("TJ", "Tajikistan"), ("TZ", "Tanzania"), ("TH", "Thailand"), ("TL", "Timor-Leste"),
    ("TG", "Togo"), ("TO", "Tonga"), ("TT", "Trinidad & Tobago"), ("TN", "Tunisia"),
    ("TR", "Türkiye"), ("TM", "Turkmenistan"), ("TV", "Tuvalu"), ("UG", "Uganda"),
    ("UA", "Ukraine"), ("AE", "UAE"), ("GB", "United Kingdom"), ("US", "United States"),
    ("UY", "Uruguay"), ("UZ", "Uzbekistan"), ("VU", "Vanuatu"), ("VE", "Venezuela"),
    ("VN", "Vietnam"), ("YE", "Yemen"), ("ZM", "Zambia"), ("ZW", "Zimbabwe"), ("XX", "Unknown"),
];

struct Registry {
    numeric_by_code: HashMap<&'static str, &'static str>,
    code_by_numeric: HashMap<&'static str, &'static str>,
    name_by_code: HashMap<&'static str, &'static str>,
}

impl Registry {
    fn build() -> Self {
        let numeric_by_code = NUMERIC_IDS.iter().copied().collect::<HashMap<_, _>>();
        let code_by_numeric = NUMERIC_IDS
            .iter()
            .map(|&(code, numeric)| (numeric, code))
            .collect::<HashMap<_, _>>();
        let name_by_code = DISPLAY_NAMES.iter().copied().collect::<HashMap<_, _>>();

        Self {
            numeric_by_code,
            code_by_numeric,
            name_by_code,
        }
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

pub fn to_numeric_id(code: &str) -> Option<&'static str> {
    REGISTRY.numeric_by_code.get(code).copied()
}

/// Resolves a numeric id to its code.
///
/// Ids that arrive without leading zeros (`"40"`) or as plain numbers are
/// re-padded to three digits before a second lookup.
pub fn to_code(numeric_id: &str) -> Option<&'static str> {
    if let Some(code) = REGISTRY.code_by_numeric.get(numeric_id).copied() {
        return Some(code);
    }

    let parsed = numeric_id.trim().parse::<u16>().ok()?;
    let padded = format!("{parsed:03}");
    REGISTRY.code_by_numeric.get(padded.as_str()).copied()
}

/// Display name for a code, or the code itself when the table has none.
pub fn display_name(code: &str) -> &str {
    REGISTRY.name_by_code.get(code).copied().unwrap_or(code)
}

pub fn is_sentinel(code: &str) -> bool {
    code == UNKNOWN_CODE
}

/// Flag emoji for a two-letter code, built from regional indicator symbols.
pub fn flag_glyph(code: &str) -> String {
    if is_sentinel(code) || code.len() != 2 {
        return UNKNOWN_GLYPH.to_string();
    }

    let glyph = code
        .chars()
        .map(|letter| {
            if !letter.is_ascii_alphabetic() {
                return None;
            }
            let offset = u32::from(letter.to_ascii_uppercase()) - u32::from('A');
            char::from_u32(REGIONAL_INDICATOR_A + offset)
        })
        .collect::<Option<String>>();

    glyph.unwrap_or_else(|| UNKNOWN_GLYPH.to_string())
}

/// Inverse of [`flag_glyph`] for a well-formed flag.
pub fn code_from_flag(glyph: &str) -> Option<String> {
    let code = glyph
        .chars()
        .map(|symbol| {
            let offset = u32::from(symbol).checked_sub(REGIONAL_INDICATOR_A)?;
            if offset >= 26 {
                return None;
            }
            char::from_u32(u32::from('A') + offset)
        })
        .collect::<Option<String>>()?;

    (code.len() == 2).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_lookups_are_bidirectional() {
        assert_eq!(to_numeric_id("RU"), Some("643"));
        assert_eq!(to_code("643"), Some("RU"));
        assert_eq!(to_numeric_id("ZZ"), None);
        assert_eq!(to_code("999"), None);

        for &(code, numeric) in NUMERIC_IDS {
            assert_eq!(to_code(numeric), Some(code), "{numeric}");
        }
    }

    #[test]
    fn numeric_ids_without_leading_zeros_resolve() {
        assert_eq!(to_code("40"), Some("AT"));
        assert_eq!(to_code("4"), Some("AF"));
        assert_eq!(to_code("not-a-number"), None);
    }

    #[test]
    fn display_name_falls_back_to_code() {
        assert_eq!(display_name("NL"), "Netherlands");
        assert_eq!(display_name("XX"), "Unknown");
        assert_eq!(display_name("HK"), "HK");
    }

    #[test]
    fn flag_glyph_uses_regional_indicators() {
        assert_eq!(flag_glyph("NL"), "\u{1F1F3}\u{1F1F1}");
        assert_eq!(flag_glyph("us"), "\u{1F1FA}\u{1F1F8}");
    }

    #[test]
    fn flag_glyph_round_trips_for_every_known_code() {
        for &(code, _) in NUMERIC_IDS {
            assert_eq!(code_from_flag(&flag_glyph(code)).as_deref(), Some(code));
        }
    }

    #[test]
    fn unknown_and_malformed_codes_get_the_generic_glyph() {
        assert_eq!(flag_glyph(UNKNOWN_CODE), UNKNOWN_GLYPH);
        assert_eq!(flag_glyph(""), UNKNOWN_GLYPH);
        assert_eq!(flag_glyph("N"), UNKNOWN_GLYPH);
        assert_eq!(flag_glyph("NLD"), UNKNOWN_GLYPH);
        assert_eq!(flag_glyph("1A"), UNKNOWN_GLYPH);
        assert_eq!(code_from_flag(UNKNOWN_GLYPH), None);
    }
}
