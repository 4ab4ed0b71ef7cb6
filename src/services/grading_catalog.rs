use crate::models::settings::GradingSystem;

const HUECO_MAX: u32 = 17;

const FONTAINEBLEAU: [&str; 25] = [
    "3", "4-", "4", "4+", "5", "5+", "6A", "6A+", "6B", "6B+", "6C", "6C+", "7A", "7A+", "7B",
    "7B+", "7C", "7C+", "8A", "8A+", "8B", "8B+", "8C", "8C+", "9A",
];

const YOSEMITE_LOW: [&str; 5] = ["5.5", "5.6", "5.7", "5.8", "5.9"];
const YOSEMITE_HIGH_MIN: u32 = 10;
const YOSEMITE_HIGH_MAX: u32 = 15;
const YOSEMITE_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Built-in grade tokens, easiest first. Chromatic grades are the user's own
/// colours and have no built-in list.
pub fn grades_for(system: GradingSystem) -> Vec<String> {
    match system {
        GradingSystem::Hueco => (0..=HUECO_MAX).map(|grade| format!("V{grade}")).collect(),
        GradingSystem::Fontainebleau => {
            FONTAINEBLEAU.iter().map(|grade| grade.to_string()).collect()
        }
        GradingSystem::Yosemite => YOSEMITE_LOW
            .iter()
            .map(|grade| grade.to_string())
            .chain((YOSEMITE_HIGH_MIN..=YOSEMITE_HIGH_MAX).flat_map(|number| {
                YOSEMITE_LETTERS
                    .iter()
                    .map(move |letter| format!("5.{number}{letter}"))
            }))
            .collect(),
        GradingSystem::Chromatic => Vec::new(),
    }
}
