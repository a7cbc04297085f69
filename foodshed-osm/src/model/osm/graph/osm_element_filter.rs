use serde::{Deserialize, Serialize};

/// selects the OSM ways that make up a travel network.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ElementFilter {
    OsmnxWalk,
    OsmnxDrive,
}

/// osmnx `settings.default_access`
const DEFAULT_ACCESS_EXCLUDED: [&str; 1] = ["private"];

const WALK_HIGHWAY_EXCLUDED: [&str; 11] = [
    "abandoned",
    "bus_guideway",
    "construction",
    "cycleway",
    "motor",
    "no",
    "planned",
    "platform",
    "proposed",
    "raceway",
    "razed",
];

const DRIVE_HIGHWAY_EXCLUDED: [&str; 20] = [
    "abandoned",
    "bridleway",
    "bus_guideway",
    "construction",
    "corridor",
    "cycleway",
    "elevator",
    "escalator",
    "footway",
    "no",
    "path",
    "pedestrian",
    "planned",
    "platform",
    "proposed",
    "raceway",
    "razed",
    "service",
    "steps",
    "track",
];

const DRIVE_SERVICE_EXCLUDED: [&str; 6] = [
    "alley",
    "driveway",
    "emergency_access",
    "parking",
    "parking_aisle",
    "private",
];

impl ElementFilter {
    /// tests the tags of a way against this filter.
    pub fn accept_way_tags(&self, tags: &[(&str, &str)]) -> bool {
        use ElementFilter as F;
        match self {
            F::OsmnxWalk => osmnx_walk_filter(tags),
            F::OsmnxDrive => osmnx_drive_filter(tags),
        }
    }
}

/// OSMNX definition:
/// filters["walk"] = (
///     f'["highway"]["area"!~"yes"]{settings.default_access}'
///     f'["highway"!~"abandoned|bus_guideway|construction|cycleway|motor|no|planned|platform|'
///     f'proposed|raceway|razed"]'
///     f'["foot"!~"no"]["service"!~"private"]'
/// )
fn osmnx_walk_filter(tags: &[(&str, &str)]) -> bool {
    let highway = match common_filter(tags) {
        Some(h) => h,
        None => return false,
    };
    if WALK_HIGHWAY_EXCLUDED.contains(&highway) {
        log::debug!("walk: excluded highway '{highway}'");
        return false;
    }
    if get_tag(tags, "foot") == Some("no") {
        log::debug!("walk: ['foot'~'no']");
        return false;
    }
    if get_tag(tags, "service") == Some("private") {
        log::debug!("walk: ['service'~'private']");
        return false;
    }
    true
}

/// OSMNX definition:
/// filters["drive"] = (
///     f'["highway"]["area"!~"yes"]{settings.default_access}'
///     f'["highway"!~"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|'
///     f"escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|"
///     f'steps|track"]'
///     f'["motor_vehicle"!~"no"]["motorcar"!~"no"]'
///     f'["service"!~"alley|driveway|emergency_access|parking|parking_aisle|private"]'
/// )
fn osmnx_drive_filter(tags: &[(&str, &str)]) -> bool {
    let highway = match common_filter(tags) {
        Some(h) => h,
        None => return false,
    };
    if DRIVE_HIGHWAY_EXCLUDED.contains(&highway) {
        log::debug!("drive: excluded highway '{highway}'");
        return false;
    }
    if get_tag(tags, "motor_vehicle") == Some("no") || get_tag(tags, "motorcar") == Some("no") {
        log::debug!("drive: motor vehicles prohibited");
        return false;
    }
    if let Some(service) = get_tag(tags, "service") {
        if DRIVE_SERVICE_EXCLUDED.contains(&service) {
            log::debug!("drive: excluded service '{service}'");
            return false;
        }
    }
    true
}

/// `["highway"]["area"!~"yes"]["access"!~"private"]`, returning the highway value
/// when the way passes.
fn common_filter<'a>(tags: &[(&'a str, &'a str)]) -> Option<&'a str> {
    let highway = get_tag(tags, "highway")?;
    if get_tag(tags, "area") == Some("yes") {
        return None;
    }
    if let Some(access) = get_tag(tags, "access") {
        if DEFAULT_ACCESS_EXCLUDED.contains(&access) {
            return None;
        }
    }
    Some(highway)
}

/// linear scan for a tag value
fn get_tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .map(str::trim)
}
