use super::{Region, RegionId};

const fn region(code: &'static str, label: &'static str, fips: &'static str, lon: f64, lat: f64) -> Region {
    Region {
        id: RegionId(code),
        label,
        join_key: fips,
        center: (lon, lat),
    }
}

/// States, DC and inhabited territories, ordered by FIPS code.
/// Centers are approximate and only used for placeholder shapes.
pub(super) static REGIONS: [Region; 56] = [
    region("AL", "Alabama", "01", -86.8, 32.8),
    region("AK", "Alaska", "02", -152.3, 64.2),
    region("AZ", "Arizona", "04", -111.7, 34.3),
    region("AR", "Arkansas", "05", -92.4, 34.9),
    region("CA", "California", "06", -119.4, 37.2),
    region("CO", "Colorado", "08", -105.5, 39.0),
    region("CT", "Connecticut", "09", -72.7, 41.6),
    region("DE", "Delaware", "10", -75.5, 39.0),
    region("DC", "District of Columbia", "11", -77.0, 38.9),
    region("FL", "Florida", "12", -81.7, 28.6),
    region("GA", "Georgia", "13", -83.4, 32.7),
    region("HI", "Hawaii", "15", -157.0, 20.8),
    region("ID", "Idaho", "16", -114.6, 44.4),
    region("IL", "Illinois", "17", -89.2, 40.0),
    region("IN", "Indiana", "18", -86.3, 39.9),
    region("IA", "Iowa", "19", -93.5, 42.1),
    region("KS", "Kansas", "20", -98.4, 38.5),
    region("KY", "Kentucky", "21", -85.3, 37.5),
    region("LA", "Louisiana", "22", -92.0, 31.1),
    region("ME", "Maine", "23", -69.2, 45.4),
    region("MD", "Maryland", "24", -76.8, 39.0),
    region("MA", "Massachusetts", "25", -71.8, 42.3),
    region("MI", "Michigan", "26", -85.4, 44.3),
    region("MN", "Minnesota", "27", -94.3, 46.3),
    region("MS", "Mississippi", "28", -89.7, 32.7),
    region("MO", "Missouri", "29", -92.5, 38.4),
    region("MT", "Montana", "30", -109.6, 47.0),
    region("NE", "Nebraska", "31", -99.8, 41.5),
    region("NV", "Nevada", "32", -116.7, 39.3),
    region("NH", "New Hampshire", "33", -71.6, 43.7),
    region("NJ", "New Jersey", "34", -74.7, 40.2),
    region("NM", "New Mexico", "35", -106.1, 34.4),
    region("NY", "New York", "36", -75.5, 42.9),
    region("NC", "North Carolina", "37", -79.4, 35.6),
    region("ND", "North Dakota", "38", -100.5, 47.5),
    region("OH", "Ohio", "39", -82.8, 40.3),
    region("OK", "Oklahoma", "40", -97.5, 35.6),
    region("OR", "Oregon", "41", -120.6, 43.9),
    region("PA", "Pennsylvania", "42", -77.8, 40.9),
    region("RI", "Rhode Island", "44", -71.5, 41.7),
    region("SC", "South Carolina", "45", -80.9, 33.9),
    region("SD", "South Dakota", "46", -100.2, 44.4),
    region("TN", "Tennessee", "47", -86.3, 35.9),
    region("TX", "Texas", "48", -99.3, 31.5),
    region("UT", "Utah", "49", -111.7, 39.3),
    region("VT", "Vermont", "50", -72.7, 44.1),
    region("VA", "Virginia", "51", -78.8, 37.5),
    region("WA", "Washington", "53", -120.4, 47.4),
    region("WV", "West Virginia", "54", -80.6, 38.6),
    region("WI", "Wisconsin", "55", -89.8, 44.6),
    region("WY", "Wyoming", "56", -107.6, 43.0),
    region("AS", "American Samoa", "60", -170.7, -14.3),
    region("GU", "Guam", "66", 144.8, 13.4),
    region("MP", "Northern Mariana Islands", "69", 145.7, 15.2),
    region("PR", "Puerto Rico", "72", -66.5, 18.2),
    region("VI", "United States Virgin Islands", "78", -64.8, 17.7),
];

/// Label nudges in reference pixels (800 px wide map) for small eastern regions
pub(super) static LABEL_OFFSETS: [(&str, (i32, i32)); 9] = [
    ("VT", (50, -8)),
    ("NH", (34, 2)),
    ("MA", (30, -1)),
    ("RI", (28, 2)),
    ("CT", (35, 10)),
    ("NJ", (34, 1)),
    ("DE", (33, 0)),
    ("MD", (47, 10)),
    ("DC", (49, 21)),
];
