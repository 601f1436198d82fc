//! Hardcoded catalog of well-known clubs, used as the terminal fallback
//! when every live source came up empty. Availability guarantee only,
//! not a source of truth.

use common::model::club::{Club, ClubType};

/// `(id, name, city, website)` — all catalog entries are football clubs.
const CLUBS: &[(&str, &str, &str, &str)] = &[
    (
        "11111111-2222-3333-4444-555555555555",
        "SK Slavia Praha",
        "Praha",
        "https://www.slavia.cz",
    ),
    (
        "22222222-3333-4444-5555-666666666666",
        "AC Sparta Praha",
        "Praha",
        "https://www.sparta.cz",
    ),
    (
        "33333333-4444-5555-6666-777777777777",
        "FC Viktoria Plzeň",
        "Plzeň",
        "https://www.fcviktoria.cz",
    ),
    (
        "44444444-5555-6666-7777-888888888888",
        "FC Baník Ostrava",
        "Ostrava",
        "https://www.fcb.cz",
    ),
    (
        "55555555-6666-7777-8888-999999999999",
        "SK Sigma Olomouc",
        "Olomouc",
        "https://www.sigmafotbal.cz",
    ),
    (
        "66666666-7777-8888-9999-aaaaaaaaaaaa",
        "FC Slovan Liberec",
        "Liberec",
        "https://www.fcslovanliberec.cz",
    ),
    (
        "77777777-8888-9999-aaaa-bbbbbbbbbbbb",
        "MFK Karviná",
        "Karviná",
        "https://www.mfkkarvina.cz",
    ),
    (
        "88888888-9999-aaaa-bbbb-cccccccccccc",
        "FC Fastav Zlín",
        "Zlín",
        "https://www.fczlin.cz",
    ),
    (
        "99999999-aaaa-bbbb-cccc-dddddddddddd",
        "FK Jablonec",
        "Jablonec nad Nisou",
        "https://www.fkjablonec.cz",
    ),
    (
        "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
        "SFC Opava",
        "Opava",
        "https://www.sfcopava.cz",
    ),
    (
        "bbbbbbbb-cccc-dddd-eeee-ffffffffffff",
        "FK Teplice",
        "Teplice",
        "https://www.fkteplice.cz",
    ),
    (
        "cccccccc-dddd-eeee-ffff-000000000000",
        "1. FK Příbram",
        "Příbram",
        "https://www.1fkpribram.cz",
    ),
    (
        "dddddddd-eeee-ffff-0000-111111111111",
        "SK Dynamo České Budějovice",
        "České Budějovice",
        "https://www.dynamocb.cz",
    ),
    (
        "eeeeeeee-ffff-0000-1111-222222222222",
        "FC Zbrojovka Brno",
        "Brno",
        "https://www.fczbrno.cz",
    ),
    (
        "ffffffff-0000-1111-2222-333333333333",
        "FC Vysočina Jihlava",
        "Jihlava",
        "https://www.fcvysocina.cz",
    ),
    (
        "00000000-1111-2222-3333-444444444444",
        "FK Mladá Boleslav",
        "Mladá Boleslav",
        "https://www.fkmb.cz",
    ),
    (
        "10101010-1111-2222-3333-444444444444",
        "SK Sigma Hranice",
        "Hranice",
        "",
    ),
    ("20202020-2222-3333-4444-555555555555", "SK Hranice", "Hranice", ""),
    ("30303030-3333-4444-5555-666666666666", "TJ Krnov", "Krnov", ""),
];

fn to_club(entry: &(&str, &str, &str, &str)) -> Club {
    Club {
        id: entry.0.to_string(),
        name: entry.1.to_string(),
        city: entry.2.to_string(),
        club_type: Some(ClubType::Football),
        website: entry.3.to_string(),
        logo_url: String::new(),
    }
}

/// Fuzzy-filter the catalog: case-insensitive substring match against
/// name and city, plus prefix match against individual name tokens.
/// Always succeeds, possibly with zero hits.
pub fn filter(query: &str) -> Vec<Club> {
    let q = query.to_lowercase();
    let mut results = Vec::new();

    for entry in CLUBS {
        let name = entry.1.to_lowercase();
        let city = entry.2.to_lowercase();

        if name.contains(&q) || city.contains(&q) {
            results.push(to_club(entry));
            continue;
        }

        if name.split_whitespace().any(|word| word.starts_with(&q)) {
            results.push(to_club(entry));
        }
    }

    results
}
