use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Sunny,
    Rain,
    Snow,
    Clouds,
}

const SUNNY: &[&str] = &[
    "    \\   /    \n     .-.     \n  ― (   ) ―  \n     `-’     \n    /   \\    ",
    "     \\ /     \n   \\ .-. /   \n ―  (   )  ― \n   / `-’ \\   \n     / \\     ",
];

const RAIN: &[&str] = &[
    "     .--.    \n  .-(    ).  \n (___.__)__) \n  ‘ ‘ ‘ ‘    \n ‘ ‘ ‘ ‘     ",
    "     .--.    \n  .-(    ).  \n (___.__)__) \n ‘ ‘ ‘ ‘     \n  ‘ ‘ ‘ ‘    ",
];

const SNOW: &[&str] = &[
    "     .--.    \n  .-(    ).  \n (___.__)__) \n  *  *  *    \n *  *  *     ",
    "     .--.    \n  .-(    ).  \n (___.__)__) \n *  *  *     \n  *  *  *    ",
];

const CLOUDS: &[&str] = &[
    "             \n     .--.    \n  .-(    ).  \n (___.__)__) \n             ",
    "             \n      .--.   \n   .-(    ). \n  (___.__)__)\n             ",
];

impl Animation {
    /// Pick the animation for a provider condition category, ignoring case.
    pub fn for_condition(category: &str) -> Option<Self> {
        match category.to_lowercase().as_str() {
            "clear" => Some(Animation::Sunny),
            "rain" => Some(Animation::Rain),
            "snow" => Some(Animation::Snow),
            "clouds" => Some(Animation::Clouds),
            _ => None,
        }
    }

    /// Frames of the loop; every frame has the same number of lines.
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            Animation::Sunny => SUNNY,
            Animation::Rain => RAIN,
            Animation::Snow => SNOW,
            Animation::Clouds => CLOUDS,
        }
    }

    pub fn frame_height(&self) -> usize {
        self.frames().first().map(|f| f.lines().count()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_ignores_case() {
        assert_eq!(Animation::for_condition("Clear"), Some(Animation::Sunny));
        assert_eq!(Animation::for_condition("clear"), Some(Animation::Sunny));
        assert_eq!(Animation::for_condition("RAIN"), Some(Animation::Rain));
        assert_eq!(Animation::for_condition("Snow"), Some(Animation::Snow));
        assert_eq!(Animation::for_condition("Clouds"), Some(Animation::Clouds));
    }

    #[test]
    fn other_conditions_have_no_animation() {
        assert_eq!(Animation::for_condition("Drizzle"), None);
        assert_eq!(Animation::for_condition("Thunderstorm"), None);
        assert_eq!(Animation::for_condition(""), None);
    }

    #[test]
    fn frames_share_a_height() {
        for anim in [Animation::Sunny, Animation::Rain, Animation::Snow, Animation::Clouds] {
            let height = anim.frame_height();
            assert!(height > 0);
            assert!(anim.frames().iter().all(|f| f.lines().count() == height));
        }
    }
}
