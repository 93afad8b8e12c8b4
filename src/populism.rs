//! Country-year panel of populist leadership.
//!
//! Episodes follow Funke, Schularick and Trebesch, "Populist leaders and the
//! economy" (2020). The panel covers every country in [`PANEL_COUNTRIES`]
//! for every year in [`PANEL_YEARS`], plus every year of every episode.
//! Cells outside an episode carry zero dummies.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::trace;

/// Years covered for every panel country.
pub const PANEL_YEARS: RangeInclusive<i32> = 1997..=2023;

/// Countries (and the euro area as `ECB`) covered by the panel.
pub const PANEL_COUNTRIES: &[&str] = &[
    "Argentina",
    "Australia",
    "Austria",
    "Belgium",
    "Bolivia",
    "Brazil",
    "Bulgaria",
    "Canada",
    "Chile",
    "China",
    "Colombia",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Ecuador",
    "Egypt",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Ireland",
    "Israel",
    "Italy",
    "Japan",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malaysia",
    "Malta",
    "Mexico",
    "Netherlands",
    "New Zealand",
    "Norway",
    "Paraguay",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Romania",
    "Russia",
    "Slovakia",
    "Slovenia",
    "South Africa",
    "South Korea",
    "Spain",
    "Sweden",
    "Switzerland",
    "Thailand",
    "Turkey",
    "United Kingdom",
    "United States",
    "Uruguay",
    "Venezuela",
    "ECB",
];

/// Political orientation of a populist leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One populist government, years inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Episode {
    pub country: &'static str,
    pub leader: &'static str,
    pub first_year: i32,
    pub last_year: i32,
    pub side: Side,
}

impl Episode {
    const fn new(
        country: &'static str,
        leader: &'static str,
        first_year: i32,
        last_year: i32,
        side: Side,
    ) -> Self {
        Self { country, leader, first_year, last_year, side }
    }

    pub fn covers(&self, country: &str, year: i32) -> bool {
        self.country == country && (self.first_year..=self.last_year).contains(&year)
    }
}

pub const EPISODES: &[Episode] = &[
    Episode::new("Argentina", "Menem", 1991, 1999, Side::Right),
    Episode::new("Argentina", "Kirchner", 2003, 2007, Side::Left),
    Episode::new("Argentina", "Fernández", 2007, 2015, Side::Left),
    Episode::new("Bolivia", "Morales", 2006, 2019, Side::Left),
    Episode::new("Brazil", "Collor", 1990, 1992, Side::Right),
    Episode::new("Bulgaria", "Borisov", 2009, 2013, Side::Right),
    Episode::new("Bulgaria", "Borisov", 2014, 2017, Side::Right),
    Episode::new("Bulgaria", "Borisov", 2017, 2021, Side::Right),
    Episode::new("Ecuador", "Correa", 2007, 2017, Side::Left),
    Episode::new("Greece", "Papandreou", 1981, 1989, Side::Left),
    Episode::new("Greece", "Papandreou", 1993, 1995, Side::Left),
    Episode::new("Greece", "Tsipras", 2015, 2019, Side::Left),
    Episode::new("Indonesia", "Widodo", 2014, 2023, Side::Left),
    Episode::new("Israel", "Netanyahu", 1996, 1999, Side::Right),
    Episode::new("Israel", "Netanyahu", 2009, 2023, Side::Right),
    Episode::new("Mexico", "López Obrador", 2018, 2023, Side::Left),
    Episode::new("Philippines", "Duterte", 2016, 2022, Side::Right),
    Episode::new("Poland", "PiS (J. Kaczyński)", 2015, 2023, Side::Right),
    Episode::new("Slovakia", "Fico", 2006, 2010, Side::Left),
    Episode::new("Slovakia", "Fico", 2012, 2018, Side::Left),
    Episode::new("South Africa", "Zuma", 2009, 2018, Side::Left),
    Episode::new("South Korea", "Roh", 2003, 2008, Side::Right),
    Episode::new("Taiwan", "Chen", 2000, 2008, Side::Right),
    Episode::new("Thailand", "Shinawatra", 2001, 2006, Side::Right),
    Episode::new("Turkey", "Erdoğan", 2003, 2023, Side::Right),
    Episode::new("United States", "Trump", 2017, 2021, Side::Right),
    Episode::new("Venezuela", "Maduro", 2013, 2023, Side::Left),
];

/// Populism dummies of one country-year cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulismStatus {
    /// 1 when a right-wing populist governed during the year.
    pub right: u8,
    /// 1 when a left-wing populist governed during the year.
    pub left: u8,
    /// 1 when any populist governed during the year.
    pub pop: u8,
}

/// Look up the panel cell for `country` in `year`.
///
/// Returns `None` when the panel has no such cell. Overlapping episodes
/// (a handover year) yield a single cell whose dummies are set if any
/// covering episode sets them.
pub fn status(country: &str, year: i32) -> Option<PopulismStatus> {
    let mut covering = EPISODES.iter().filter(|e| e.covers(country, year)).peekable();
    let in_grid = PANEL_YEARS.contains(&year) && PANEL_COUNTRIES.contains(&country);
    if !in_grid && covering.peek().is_none() {
        return None;
    }

    let mut cell = PopulismStatus::default();
    for episode in covering {
        trace!(country, year, leader = episode.leader, side = ?episode.side, "Populist episode");
        cell.pop = 1;
        match episode.side {
            Side::Right => cell.right = 1,
            Side::Left => cell.left = 1,
        }
    }
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkey_under_erdogan() {
        assert_eq!(
            status("Turkey", 2010),
            Some(PopulismStatus { right: 1, left: 0, pop: 1 })
        );
        assert_eq!(status("Turkey", 2001), Some(PopulismStatus::default()));
    }

    #[test]
    fn test_left_episode() {
        assert_eq!(
            status("Venezuela", 2015),
            Some(PopulismStatus { right: 0, left: 1, pop: 1 })
        );
    }

    #[test]
    fn test_episode_bounds_are_inclusive() {
        assert_eq!(status("United States", 2017).map(|s| s.pop), Some(1));
        assert_eq!(status("United States", 2021).map(|s| s.pop), Some(1));
        assert_eq!(status("United States", 2022).map(|s| s.pop), Some(0));
    }

    #[test]
    fn test_handover_year_is_a_single_cell() {
        assert_eq!(
            status("Bulgaria", 2017),
            Some(PopulismStatus { right: 1, left: 0, pop: 1 })
        );
    }

    #[test]
    fn test_cells_outside_the_grid() {
        // Episode years before the grid still form cells.
        assert_eq!(
            status("Argentina", 1992),
            Some(PopulismStatus { right: 1, left: 0, pop: 1 })
        );
        assert_eq!(status("Germany", 1992), None);
        assert_eq!(status("Germany", 2024), None);
        assert_eq!(status("Atlantis", 2010), None);
    }

    #[test]
    fn test_every_episode_is_well_formed() {
        for episode in EPISODES {
            assert!(episode.first_year <= episode.last_year, "{episode:?}");
        }
    }
}
