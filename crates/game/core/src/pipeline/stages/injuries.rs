//! Pain and stress from injuries and depleted pools.

use crate::pipeline::StageContext;
use crate::schema::Pool;
use crate::state::{Injury, Track};

/// Pool whose depletion feeds each track.
const TRACKS: [(Track, Pool); 2] = [(Track::Pain, Pool::Health), (Track::Stress, Pool::Resolve)];

fn contribution(injury: &Injury, track: Track) -> i32 {
    match track {
        Track::Pain => injury.pain,
        Track::Stress => injury.stress,
    }
}

pub fn run(ctx: &mut StageContext<'_>) {
    let rules = &ctx.rules.injuries;
    for (track, pool) in TRACKS {
        let sources = ctx
            .sources
            .injuries
            .iter()
            .fold(0i32, |sum, injury| sum.saturating_add(contribution(injury, track)));
        let threshold = ctx
            .state
            .meter(pool)
            .map(|meter| rules.threshold_bonus(meter.current(), meter.max))
            .unwrap_or(0);

        let entry = ctx.state.track_mut(track);
        entry.sources = sources;
        entry.threshold = threshold;
        entry.calculated = sources
            .saturating_add(threshold)
            .saturating_add(entry.modifier)
            .max(0);
        entry.penalty_dice = rules.penalty_dice(entry.calculated);
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::Stage;
    use crate::pipeline::stages::fixtures;
    use crate::schema::Pool;
    use crate::state::{Injury, Meter, Sources, Track};

    fn wounded(pain: &[i32]) -> Sources {
        Sources {
            injuries: pain
                .iter()
                .enumerate()
                .map(|(i, &pain)| Injury::new(&format!("wound-{i}"), pain, 0))
                .collect(),
            ..Sources::default()
        }
    }

    #[test]
    fn pain_penalty_dice_by_band() {
        for (pain, dice) in [(5, 0), (6, 1), (11, 2), (16, 2)] {
            let mut state = fixtures::state();
            fixtures::run(&[Stage::Injuries], &mut state, &wounded(&[pain]));
            assert_eq!(state.track(Track::Pain).calculated, pain);
            assert_eq!(state.track(Track::Pain).penalty_dice, dice, "pain {pain}");
        }
    }

    #[test]
    fn injuries_sum_and_modifier_applies() {
        let mut state = fixtures::state();
        state.stress.modifier = -10;
        let sources = Sources {
            injuries: vec![Injury::new("cut", 2, 1), Injury::new("burn", 3, 2)],
            ..Sources::default()
        };

        fixtures::run(&[Stage::Injuries], &mut state, &sources);

        assert_eq!(state.track(Track::Pain).sources, 5);
        assert_eq!(state.track(Track::Stress).sources, 3);
        assert_eq!(state.track(Track::Stress).calculated, 0);
        assert_eq!(state.track(Track::Stress).modifier, -10);
    }

    #[test]
    fn depleted_health_adds_threshold_pain() {
        let mut state = fixtures::state();
        state.resources.insert(Pool::Health, Meter::new(3, 14));

        fixtures::run(&[Stage::Injuries], &mut state, &wounded(&[2]));

        assert_eq!(state.track(Track::Pain).threshold, 4);
        assert_eq!(state.track(Track::Pain).calculated, 6);
        assert_eq!(state.track(Track::Pain).penalty_dice, 1);
    }
}
