//! Ordered heuristic keywords per role.
//!
//! Keywords are matched as substrings of the normalized header, in list
//! order. Dutch variants sit next to their English counterparts.

use podium_model::Role;

pub fn role_keywords(role: Role) -> &'static [&'static str] {
    match role {
        Role::Competitor => &[
            "rijder", "rider", "athlete", "naam", "name", "skater", "persoon", "person",
        ],
        Role::Sex => &["gender", "geslacht", "sex", "sekse", "m/v", "m-f"],
        Role::Country => &["country", "land", "noc", "nation", "nat", "team"],
        Role::Distance => &["afstand", "distance", "event", "discipline", "category"],
        Role::Time => &["time", "tijd", "result", "lap time", "performance"],
        Role::Rank => &["rank", "positie", "place", "pos", "finish", "result rank"],
        Role::Date => &["date", "datum", "day", "start date", "competition date"],
        Role::Competition => &[
            "competition",
            "wedstrijd",
            "event name",
            "meet",
            "toernooi",
            "tournament",
        ],
        Role::Location => &["location", "locatie", "venue", "plaats", "city"],
        Role::Season => &["season", "seizoen"],
        Role::Race => &["race", "heat", "rit", "ronde"],
        Role::Winner => &["winner", "winnaar"],
    }
}
