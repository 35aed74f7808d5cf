//! Text rendition of presentation cues.
use std::time::Duration;

use async_trait::async_trait;

use revenge_core::{Cue, Cutscene, Pose, Side};
use revenge_runtime::Presenter;

/// Prints cues to stdout and holds blocking cues for a fixed duration.
pub struct ConsolePresenter {
    cue_duration: Duration,
}

impl ConsolePresenter {
    pub fn new(cue_duration: Duration) -> Self {
        Self { cue_duration }
    }
}

#[async_trait]
impl Presenter for ConsolePresenter {
    fn show(&self, cue: &Cue) {
        if let Some(line) = describe(cue) {
            println!("{line}");
        }
    }

    async fn play(&self, cue: &Cue) {
        self.show(cue);
        let hold = match cue {
            Cue::Cutscene(_) => self.cue_duration * 4,
            _ => self.cue_duration,
        };
        tokio::time::sleep(hold).await;
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Enemy => "Boss",
    }
}

/// One line per cue. Poses other than the low-HP one are not worth printing.
pub fn describe(cue: &Cue) -> Option<String> {
    let line = match cue {
        Cue::Sound(_) | Cue::StopMusic => return None,
        Cue::Pose { side, pose } => match pose {
            Pose::Angry => format!("  {} look furious.", side_label(*side)),
            Pose::Dodge => format!("  {} dodge!", side_label(*side)),
            Pose::Normal | Pose::Throw => return None,
        },
        Cue::Projectile { from, .. } => format!("  {} throw...", side_label(*from)),
        Cue::FloatingText { side, text } => format!("  [{}] {text}", side_label(*side)),
        Cue::TimingResult { tier } => format!("  Timing: {tier}"),
        Cue::HpChanged { side, hp, max_hp } => {
            format!("  {} HP {:.0}/{:.0}", side_label(*side), hp, max_hp)
        }
        Cue::ItemDescription { text, .. } => format!("> {text}"),
        Cue::ItemUnlocked { item } => format!("* Unlocked {item}"),
        Cue::StageStarted { index, enemy, rank } => {
            format!("=== Stage {}: {enemy} the {} ===", index + 1, rank.title())
        }
        Cue::Music(track) => format!("  ♪ {}", track.name()),
        Cue::Cutscene(Cutscene::Intro) => {
            "Years of overtime. Tonight, the office pays it back.".to_string()
        }
        Cue::Cutscene(Cutscene::GameOver) => "GAME OVER. Type `restart` to try again.".to_string(),
        Cue::Cutscene(Cutscene::GameClear) => {
            "The CEO falls. You are free. Type `restart` for a new campaign.".to_string()
        }
    };
    Some(line)
}
