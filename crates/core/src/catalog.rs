//! The compiled-in department overview deck.

use crate::{Deck, DeckInfo, Quote, Result, Slide, SpotlightItem, Stat};

/// Metadata for the department overview deck.
pub fn department_overview_info() -> DeckInfo {
    DeckInfo::new("F STSC Department Overview", "F STSC Department", "F STSC")
}

/// Build the department overview deck.
///
/// The content is fixed at compile time; callers construct it once at
/// startup and pass it to the viewer and exporter.
pub fn department_overview() -> Result<Deck> {
    Deck::new(department_overview_info(), department_overview_slides())
}

fn department_overview_slides() -> Vec<Slide> {
    vec![
        Slide::new("cover", "F STSC Department")
            .with_subtitle("Future Science, Technology & Societal Change")
            .with_bullets([
                "Innovating across science, systems, and communities",
                "Driving inclusive, sustainable impact",
            ])
            .with_footer("Academic Year 2024-2025"),
        Slide::new("mission", "Mission & Vision")
            .with_bullets([
                "Advance integrative research at the nexus of science, technology, sustainability, and culture.",
                "Equip learners to lead transformative change across public, private, and civic sectors.",
                "Partner with communities to prototype solutions that scale responsibly.",
            ])
            .with_footer("Guiding principles built with faculty, alumni, and stakeholders."),
        Slide::new("pillars", "Strategic Pillars")
            .with_bullets([
                "Connected Scholarship",
                "Immersive Learning",
                "Impactful Partnerships",
                "Responsible Innovation",
            ])
            .with_spotlight([
                SpotlightItem::new("Academics", "18 interdisciplinary tracks"),
                SpotlightItem::new("Research", "42 active labs"),
                SpotlightItem::new("Community", "60+ civic partners"),
            ]),
        Slide::new("programs", "Signature Programs").with_bullets([
            "Systems Futures Studio: multi-sector design sprints for urgent challenges.",
            "Tech for Humanity Lab: ethics, AI alignment, and policy innovation.",
            "Resilient Cities Residency: field immersion across 5 global hubs.",
            "Digital Commons Accelerator: open knowledge and platform cooperatives.",
        ]),
        Slide::new("research", "Research Highlights")
            .with_stats([
                Stat::new("Funded projects", "94"),
                Stat::new("External grants (FY24)", "$68M"),
                Stat::new("Peer-reviewed outputs", "310+"),
                Stat::new("Multidisciplinary teams", "78%"),
            ])
            .with_bullets([
                "Climate-adaptive infrastructure modeling adopted by 4 city governments.",
                "Inclusive AI frameworks informing international regulation standards.",
                "Bio-circular materials prototype reaching pilot production in Q2 2025.",
            ]),
        Slide::new("students", "Student Experience")
            .with_bullets([
                "Curriculum sequenced around challenge-based studios.",
                "Mentorship lattice connecting alumni, researchers, and civic leaders.",
                "Global exchange nodes in Singapore, Accra, Rotterdam, and São Paulo.",
            ])
            .with_stats([
                Stat::new("Enrollment growth", "27% YoY"),
                Stat::new("Experiential placements", "93%"),
                Stat::new("Retention", "96%"),
            ]),
        Slide::new("partnerships", "Partnership Network")
            .with_bullets([
                "Strategic alliances with UNDP, World Economic Forum, and local municipalities.",
                "Industry consortium on responsible automation with 18 corporate partners.",
                "Community innovation grants program funding 150+ grassroots projects.",
            ])
            .with_spotlight([
                SpotlightItem::new("Partner satisfaction", "4.8/5"),
                SpotlightItem::new("Joint pilots launched", "32"),
                SpotlightItem::new("Policy briefings delivered", "21 governments"),
            ]),
        Slide::new("roadmap", "2025 Roadmap")
            .with_bullets([
                "Launch F STSC Insight Observatory for data-driven foresight.",
                "Open-source Toolbox for regenerative systems design.",
                "Expand micro-credential stack with online-first formats.",
                "Build Living Learning Lab inside the new Sustainability Commons.",
            ])
            .with_footer("Key milestones tracked via quarterly OKR cycles."),
        Slide::new("impact", "Measuring Impact")
            .with_bullets([
                "Triple bottom line scorecards embedded in every initiative.",
                "Community impact audits driven by participatory evaluation.",
                "Alumni impact fellows tracking longitudinal outcomes.",
            ])
            .with_stats([
                Stat::new("Communities served", "275"),
                Stat::new("SDG alignment", "13 goals"),
                Stat::new("Equitable access", "72% scholarships"),
            ])
            .with_footer("Evidence informed, community accountable."),
        Slide::new("cta", "Call to Collaborate")
            .with_subtitle("Co-create the future with F STSC")
            .with_bullets([
                "Engage in cross-sector pilot projects.",
                "Sponsor applied research cohorts.",
                "Invest in student innovation seed funds.",
                "Champion equitable, regenerative systems.",
            ])
            .with_quote(
                Quote::new(
                    "We are architects of possibility, translating vision into shared progress.",
                    "Dr. Amina Rios",
                )
                .with_role("Dean, F STSC Department"),
            ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builds() {
        let deck = department_overview().unwrap();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.slides()[0].id, "cover");
        assert_eq!(deck.slides()[9].id, "cta");
    }

    #[test]
    fn test_catalog_export_name() {
        let deck = department_overview().unwrap();
        assert_eq!(
            deck.info().export_file_name(),
            "F-STSC-Department-Overview.pptx"
        );
    }

    #[test]
    fn test_catalog_never_mixes_stats_and_spotlight() {
        let deck = department_overview().unwrap();
        assert!(deck
            .slides()
            .iter()
            .all(|s| s.stats.is_empty() || s.spotlight.is_empty()));
    }
}
