use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_snake::core::{Board, GameState, SimpleRng, StepOutcome};
use tui_snake::term::{FrameBuffer, GameView, Viewport};
use tui_snake::types::{Direction, Point, BOARD_CELLS};

use arrayvec::ArrayVec;

fn bench_step(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.set_direction(Direction::Right);

    c.bench_function("snake_step", |b| {
        b.iter(|| {
            if state.step() == StepOutcome::Idle {
                state.set_direction(Direction::Right);
                state.set_direction(Direction::Up);
            }
            black_box(state.head());
        })
    });
}

fn bench_place_food(c: &mut Criterion) {
    // A long snake leaves few free cells, the worst case for placement.
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..18 {
            board.set_occupied(Point::new(x, y), true);
        }
    }
    let mut rng = SimpleRng::new(7);
    let mut free = ArrayVec::<Point, BOARD_CELLS>::new();

    c.bench_function("place_food_crowded", |b| {
        b.iter(|| {
            board.free_cells_into(&mut free);
            black_box(rng.pick(&free));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(1);
    state.set_direction(Direction::Up);
    let snap = state.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(120, 40);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_full_frame", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), vp, &mut fb);
        })
    });
}

criterion_group!(benches, bench_step, bench_place_food, bench_render);
criterion_main!(benches);
