use india_internship_map::domain::{find_region, Region, REGIONS};

/// Direction of an arrow key on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

/// How far off-axis a neighbour may lie, relative to its distance along
/// the heading.
const CONE: f64 = 1.5;

/// Closest region in the given direction, if any lies within the cone.
pub fn neighbor(from: &str, heading: Heading) -> Option<&'static str> {
    let origin = find_region(from)?;

    REGIONS
        .iter()
        .filter(|region| region.code != origin.code)
        .filter_map(|region| {
            let (along, across) = offsets(origin, region, heading);
            (along > 0.0 && across.abs() <= along * CONE)
                .then(|| (region, along.hypot(across)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(region, _)| region.code)
}

fn offsets(origin: &Region, region: &Region, heading: Heading) -> (f64, f64) {
    let east = region.lon - origin.lon;
    let north = region.lat - origin.lat;
    match heading {
        Heading::North => (north, east),
        Heading::South => (-north, east),
        Heading::East => (east, north),
        Heading::West => (-east, north),
    }
}

/// Next (or previous) region in table order, wrapping at both ends.
/// Unknown codes start from the first region.
pub fn cycle(from: &str, forward: bool) -> &'static str {
    let len = REGIONS.len();
    let next = REGIONS
        .iter()
        .position(|region| region.code == from)
        .map_or(0, |index| {
            if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        });
    REGIONS[next].code
}
