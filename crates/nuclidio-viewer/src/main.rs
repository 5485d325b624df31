//! Nuclidio Viewer - Bevy-based board rendering and input
//!
//! The board is the chart of nuclides: one card per catalog entry, column =
//! isotope number, row = atomic number. Right arrow captures a neutron, Up
//! captures a proton. Landing on an unstable card starts a short pause
//! during which input is ignored and the token shows the unsafe color; when
//! the pause ends the drawn decay is applied.
//!
//! Usage:
//!   cargo run -p nuclidio-viewer [elements.csv] [nuclides.csv]

use bevy::prelude::*;

use nuclidio_core::{Catalog, GameSession, Phase};
use nuclidio_logic::{DecayMode, Nuclide};

const SCREEN_X: f32 = 1280.0;
const SCREEN_Y: f32 = 768.0;
const CARD_SIZE: f32 = 64.0;
const DECAY_PAUSE_SECS: f32 = 0.6;

// Debug keys: force each decay mode, reset to origin.
const DEBUG_KEYS: bool = true;

const COLOR_STABLE: Color = Color::srgb(0.88, 0.88, 0.86);
const COLOR_UNSTABLE: Color = Color::srgb(0.48, 0.48, 0.54);
const COLOR_CARD_TEXT: Color = Color::srgb(0.08, 0.08, 0.1);
const COLOR_CARD_BORDER: Color = Color::srgb(0.12, 0.12, 0.15);
const COLOR_TOKEN_SAFE: Color = Color::srgb(1.0, 0.25, 0.25);
const COLOR_TOKEN_UNSAFE: Color = Color::srgb(1.0, 0.85, 0.2);

fn main() {
    let mut args = std::env::args().skip(1);
    let elements_path = args
        .next()
        .unwrap_or_else(|| "data/elements.csv".to_string());
    let nuclides_path = args
        .next()
        .unwrap_or_else(|| "data/nuclides.csv".to_string());

    let catalog = match Catalog::load(&elements_path, &nuclides_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("failed to load card tables: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Nuclidio".to_string(),
                resolution: (SCREEN_X, SCREEN_Y).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Session(GameSession::new(catalog)))
        .insert_resource(DecayPause(None))
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, tick_decay_pause, render_board).chain())
        .run();
}

#[derive(Resource)]
struct Session(GameSession);

/// Running timer while a decay resolution is pending. `None` when idle.
#[derive(Resource)]
struct DecayPause(Option<Timer>);

/// World-space center of a card (or the token) at a chart coordinate.
fn card_center(nuclide: Nuclide) -> Vec2 {
    Vec2::new(
        nuclide.isotope_num as f32 * CARD_SIZE,
        nuclide.atomic_num as f32 * CARD_SIZE,
    )
}

fn setup(mut commands: Commands, session: Res<Session>) {
    let catalog = session.0.catalog();

    // Camera centered on the board extents.
    let center = Vec2::new(
        (catalog.max_isotope_num() as f32 + 1.0) / 2.0 * CARD_SIZE,
        (catalog.max_atomic_num() as f32 + 1.0) / 2.0 * CARD_SIZE,
    );
    commands.spawn((
        Camera2d::default(),
        Transform::from_xyz(center.x, center.y, 0.0),
    ));

    // Cards never change after load, so spawn them once. Fill is keyed by
    // stability; label and isotope number sit in fixed corner offsets.
    for card in catalog.cards() {
        let fill = if card.stable {
            COLOR_STABLE
        } else {
            COLOR_UNSTABLE
        };
        let pos = card_center(card.nuclide);

        commands
            .spawn((
                Sprite::from_color(fill, Vec2::splat(CARD_SIZE - 2.0)),
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(card.label.clone()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(COLOR_CARD_TEXT),
                    Transform::from_xyz(-CARD_SIZE / 2.0 + 14.0, CARD_SIZE / 2.0 - 12.0, 1.0),
                ));
                parent.spawn((
                    Text2d::new(card.nuclide.isotope_num.to_string()),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(COLOR_CARD_TEXT),
                    Transform::from_xyz(CARD_SIZE / 2.0 - 12.0, -CARD_SIZE / 2.0 + 10.0, 1.0),
                ));
            });
    }

    info!("Loaded {} isotope cards", catalog.len());
}

fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut pause: ResMut<DecayPause>,
) {
    if pause.0.is_some() {
        // Mid-decay: the pause blocks all input.
        return;
    }

    let mut rng = rand::thread_rng();

    if keyboard.just_pressed(KeyCode::ArrowRight) {
        session.0.add_neutron(&mut rng);
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        session.0.add_proton(&mut rng);
    }

    if DEBUG_KEYS {
        if keyboard.just_pressed(KeyCode::KeyM) {
            session.0.force_decay(DecayMode::BetaMinus);
        }
        if keyboard.just_pressed(KeyCode::KeyP) {
            session.0.force_decay(DecayMode::BetaPlus);
        }
        if keyboard.just_pressed(KeyCode::KeyA) {
            session.0.force_decay(DecayMode::Alpha);
        }
        if keyboard.just_pressed(KeyCode::KeyR) {
            session.0.reset();
        }
    }

    // A capture may have landed on an unstable card. The pending draw is
    // read back from the session phase rather than the move outcome, so a
    // second key in the same frame (whose rejected move would shadow the
    // outcome) cannot leave a drawn decay without its pause.
    if let Phase::Decaying { mode } = session.0.phase() {
        info!("unstable card at {}: drew {}", session.0.position(), mode);
        pause.0 = Some(Timer::from_seconds(DECAY_PAUSE_SECS, TimerMode::Once));
    }
}

fn tick_decay_pause(
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut pause: ResMut<DecayPause>,
) {
    let Some(timer) = pause.0.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).finished() {
        let mode = session.0.settle();
        info!("decay settled: {} -> {}", mode, session.0.position());
        pause.0 = None;
    }
}

fn render_board(session: Res<Session>, mut gizmos: Gizmos) {
    // Card borders are gizmos so they draw above the sprite fills.
    for card in session.0.catalog().cards() {
        gizmos.rect_2d(
            Isometry2d::from_translation(card_center(card.nuclide)),
            Vec2::splat(CARD_SIZE - 2.0),
            COLOR_CARD_BORDER,
        );
    }

    let color = if session.0.is_safe() {
        COLOR_TOKEN_SAFE
    } else {
        COLOR_TOKEN_UNSAFE
    };

    // Nested rects stand in for a thick outline.
    let center = card_center(session.0.position());
    for inset in [0.0, 2.0, 4.0] {
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            Vec2::splat(CARD_SIZE - inset),
            color,
        );
    }
}
