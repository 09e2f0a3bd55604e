//! Simulates a host: opens a profile avatar into its detail header, then
//! drags the header partway down and releases it so it settles back.

use herokit_core::{
    Config, CornerRadii, HeroCommand, HeroEngine, HeroId, Inputs, Rect, TransitionState,
};
use serde_json::to_string_pretty;

fn main() -> anyhow::Result<()> {
    let mut eng = HeroEngine::new(Config::default());
    let hero = HeroId::from("profile-42");

    // Layout pass measured the avatar in the list, then the user tapped it.
    let open = Inputs::from(vec![
        HeroCommand::Register {
            hero: hero.clone(),
            radii: CornerRadii::new(25.0, 0.0),
        },
        HeroCommand::MeasureSource {
            hero: hero.clone(),
            rect: Rect::new(20.0, 140.0, 50.0, 50.0),
        },
        HeroCommand::Start { hero: hero.clone() },
        HeroCommand::AnimateTo {
            hero: hero.clone(),
            target: 1.0,
            duration_s: 0.3,
            easing: None,
        },
    ]);
    let out = eng.update(0.0, open);
    println!("tap:\n{}", to_string_pretty(out)?);

    // The detail view mounts and reports its header rect on the next frame.
    let mounted = Inputs::from(vec![HeroCommand::MeasureDestination {
        hero: hero.clone(),
        rect: Rect::new(0.0, 0.0, 390.0, 300.0),
    }]);
    eng.update(1.0 / 60.0, mounted);
    while eng.is_animating(&hero) {
        let out = eng.update(1.0 / 60.0, Inputs::default());
        if let Some(frame) = out.frame_for(&hero) {
            println!(
                "open p={:.3} rect={:?} radius={:.2}",
                frame.progress, frame.rect, frame.corner_radius
            );
        }
    }

    // Interactive dismissal: drag 90pt, release slowly, settle back open.
    let mut drag = Inputs::default();
    drag.push(HeroCommand::StartReverse { hero: hero.clone() })
        .push(HeroCommand::Drag {
            hero: hero.clone(),
            translation: 90.0,
        })
        .push(HeroCommand::Release {
            hero: hero.clone(),
            velocity: 120.0,
        });
    eng.update(1.0 / 60.0, drag);
    while eng.is_animating(&hero) {
        let out = eng.update(1.0 / 60.0, Inputs::default());
        for event in &out.events {
            println!("event: {}", serde_json::to_string(event)?);
        }
    }

    let state = eng
        .transition(&hero)
        .map(|t| t.state())
        .unwrap_or(TransitionState::Idle);
    println!("final state: {}", state.name());
    Ok(())
}
