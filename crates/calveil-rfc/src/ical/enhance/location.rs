//! Campus location resolution.
//!
//! Maps the free-text LOCATION of an upstream event onto a static campus
//! record with a street address and GPS coordinates. Resolution is pure and
//! infallible: unknown text falls back to the main campus building.

use once_cell::sync::Lazy;
use regex::Regex;

/// An immutable campus site record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusRecord {
    pub key: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    /// `lat,lon` pair, rendered verbatim into the structured location.
    pub coords: &'static str,
    pub plus_code: &'static str,
    pub notes: &'static str,
}

/// Synthetic record for online-only events.
static ONLINE: CampusRecord = CampusRecord {
    key: "Online",
    name: "Online",
    address: "Online",
    coords: "0,0",
    plus_code: "",
    notes: "",
};

// The first entry is the default campus building.
static CAMPUS_TABLE: [CampusRecord; 9] = [
    CampusRecord {
        key: "CUBE",
        name: "CUBE",
        address: "Sonnenallee 221A, 12059 Berlin",
        coords: "52.475147,13.468200",
        plus_code: "GCR9+7H7",
        notes: "",
    },
    CampusRecord {
        key: "A",
        name: "SHED",
        address: "Sonnenallee 221C, 12059 Berlin",
        coords: "52.4758038,13.4549394",
        plus_code: "GCC5+QW",
        notes: "",
    },
    CampusRecord {
        key: "B",
        name: "SHED",
        address: "Sonnenallee 221C, 12059 Berlin",
        coords: "52.4758038,13.4549394",
        plus_code: "GCC5+QW",
        notes: "",
    },
    CampusRecord {
        key: "C",
        name: "SHED",
        address: "Sonnenallee 221D, 12059 Berlin",
        coords: "52.4760266,13.4549741",
        plus_code: "GCC5+RX",
        notes: "",
    },
    CampusRecord {
        key: "D",
        name: "SHED",
        address: "Sonnenallee 221E, 12059 Berlin",
        coords: "52.4762398,13.4550747",
        plus_code: "GCC6+22",
        notes: "",
    },
    CampusRecord {
        key: "SON223",
        name: "Sonnenallee 223",
        address: "Sonnenallee 223, 12059 Berlin",
        coords: "52.47446,13.455246",
        plus_code: "GCC5+GG",
        notes: "",
    },
    CampusRecord {
        key: "SON224A",
        name: "Sonnenallee 224a",
        address: "Sonnenallee 224a, 12059 Berlin",
        coords: "52.474447,13.456046",
        plus_code: "GCC5+GH",
        notes: "",
    },
    CampusRecord {
        key: "DEKRA",
        name: "DEKRA Akademie",
        address: "Kiehlufer 163, 12057 Berlin",
        coords: "52.478946,13.458246",
        plus_code: "GCH6+JW",
        notes: "",
    },
    CampusRecord {
        key: "CN",
        name: "Colonia Nova",
        address: "Thiemannstraße 1, 12059 Berlin",
        coords: "52.476946,13.451246",
        plus_code: "GCC4+XV",
        notes: "",
    },
];

/// Known room-number shapes: an optional building letter before a dotted
/// room code, or a named building followed by a room code.
static ROOM_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[A-D]?\d+\.\d+|CUBE\s+\d+\.\d+|SON\s+\d+\.\d+|Seminar\s+\d+").unwrap()
});

/// A resolved location: the campus record plus the room token extracted
/// from the raw text (empty when none matched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub record: &'static CampusRecord,
    pub room: String,
}

impl ResolvedLocation {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.record.key == ONLINE.key
    }
}

fn campus(key: &str) -> Option<&'static CampusRecord> {
    CAMPUS_TABLE.iter().find(|record| record.key == key)
}

/// Resolves free-text location to a campus record.
///
/// Deterministic and side-effect-free. Never fails: text that matches no
/// rule resolves to the default campus building. The precedence order of
/// the classification rules is load-bearing; overlapping conditions must
/// be evaluated exactly in this order.
#[must_use]
pub fn resolve_location(raw: &str) -> ResolvedLocation {
    if raw.is_empty() || raw.eq_ignore_ascii_case("online") {
        return ResolvedLocation {
            record: &ONLINE,
            room: String::new(),
        };
    }

    let room = ROOM_TOKEN
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let upper = raw.to_uppercase();

    let mut key = "CUBE";
    if upper.contains("KIEHLUFER") {
        key = "DEKRA";
    } else if upper.contains("THIEMANN") {
        key = "CN";
    } else if raw.contains("223") {
        key = "SON223";
    } else if raw.contains("224a") {
        key = "SON224A";
    } else if !room.is_empty() {
        let room_upper = room.to_uppercase();
        if room_upper.starts_with("CUBE") {
            key = "CUBE";
        } else {
            let first = &room_upper[..1];
            if let Some(hit) = campus(first) {
                key = hit.key;
            } else if upper.contains("CUBE") {
                key = "CUBE";
            } else if first.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                key = "CUBE";
            }
        }
    }

    ResolvedLocation {
        record: campus(key).unwrap_or(&CAMPUS_TABLE[0]),
        room,
    }
}
