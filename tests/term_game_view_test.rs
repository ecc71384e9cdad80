use tetris_train::core::{Descent, GameState};
use tetris_train::term::{AnchorY, FrameBuffer, GameView, Viewport};
use tetris_train::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board = 10*2 by 18*1 => 20x18, plus border => 22x20
    let fb = view.render(&snap, Viewport::new(22, 20));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(21, 19).unwrap().ch, '┘');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_renders_placed_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[17][0] = PieceKind::I.code();

    let fb = GameView::default().render(&snap, Viewport::new(22, 20));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 18).unwrap().ch, '█');
    assert_eq!(fb.get(2, 18).unwrap().ch, '█');
    assert_eq!(fb.get(3, 18).unwrap().ch, '·');
}

#[test]
fn term_view_draws_rail_over_committed_piece() {
    let mut game = GameState::new(1);
    assert!(game.spawn(PieceKind::I));
    while game.tick_descend() == Descent::Moved {}
    let snap = game.snapshot();
    assert_eq!(snap.rail.len(), 2);

    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    // Bar covers columns 4..=7 on the bottom row; track starts at its left edge.
    assert_eq!(fb.get(1 + 4 * 2, 18).unwrap().ch, '═');
    assert_eq!(fb.get(1 + 5 * 2, 18).unwrap().ch, '█');

    let plain = GameView::default()
        .with_rail(false)
        .render(&snap, Viewport::new(22, 20));
    assert_eq!(plain.get(1 + 4 * 2, 18).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut game = GameState::new(1);
    game.start();
    let mut snap = game.snapshot();
    snap.score = 1234;

    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("docked"));

    let narrow = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(!screen_text(&narrow).contains("SCORE"));
}

#[test]
fn term_view_shows_train_progress_once_rail_exists() {
    let mut game = GameState::new(1);
    assert!(game.spawn(PieceKind::O));
    while game.tick_descend() == Descent::Moved {}

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 20));
    let all = screen_text(&fb);
    assert!(all.contains("1/4"));
    assert!(!all.contains("docked"));
}

#[test]
fn term_view_draws_docked_train_left_of_board() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 20));

    // Frame starts at x = (60 - 22) / 2 = 19. The dock sits a little over
    // a block left of the grid and partway down it.
    assert_eq!(fb.get(16, 15).unwrap().ch, '▼');
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut snap = GameState::new(1).snapshot();
    snap.paused = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(fb.row_text(10).contains("PAUSED"));

    snap.paused = false;
    snap.game_over = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(fb.row_text(10).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();

    // Board frame is 20 rows tall (18 + border).
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));
    // start_y = (30 - 20) / 2 = 5 => top-left corner at (0,5).
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');

    let top = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 30));
    assert_eq!(top.get(0, 0).unwrap().ch, '┌');
}
