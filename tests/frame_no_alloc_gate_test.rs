use std::alloc::{GlobalAlloc, Layout, System};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pong_display::core::Palette;
use pong_display::term::{Display, RenderMode};
use pong_display::types::{Ball, Coordinate, Paddle, Side};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn draw_scene(display: &mut Display<io::Sink>, t: f64, winner: Option<Side>) {
    let mut frame = display.begin();
    match winner {
        Some(side) => frame.draw_win_screen(side).unwrap(),
        None => {
            frame.draw_background();
            frame.draw_paddle(&Paddle::new((2.0, 10.0 + t.sin() * 6.0), 4.0, Side::Left));
            frame.draw_paddle(&Paddle::new((77.0, 10.0 - t.sin() * 6.0), 4.0, Side::Right));
            frame.draw_ball(&Ball::new((40.0 + t.cos() * 30.0, 12.0 + t.sin() * 10.0)));
            frame.draw_score(t as u64, Coordinate::new(20, 3)).unwrap();
            frame.draw_score(1_000 + t as u64, Coordinate::new(60, 3)).unwrap();
        }
    }
    frame.end().unwrap();
}

#[test]
fn frame_cycle_is_allocation_free_after_warmup() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut display =
        Display::with_sink(io::sink(), 80, 24, Palette::default(), RenderMode::Diff).unwrap();

    // Warm-up: first full frame, win screen, and enough frames to size the
    // output buffer.
    for i in 0..10 {
        draw_scene(&mut display, i as f64, None);
    }
    draw_scene(&mut display, 0.0, Some(Side::Left));
    draw_scene(&mut display, 0.0, None);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            let winner = (i % 50 == 0).then_some(Side::Right);
            draw_scene(&mut display, i as f64 * 0.1, winner);
        }
    });

    assert!(allocs == 0);
}
