//! End-to-end properties of the renderer, driven through the public API only.

mod common;

use bit_field::BitField;
use common::{AcceptingEnv, RecordingHost};
use hello_core::color::{BLACK, RED, WHITE};
use hello_core::renderer::Phase;
use hello_core::{font, Button, CoreConfig, CursorMode, FrameBuffer, Renderer, HEIGHT, WIDTH};

fn running(config: CoreConfig) -> (Renderer, RecordingHost) {
    let mut renderer = Renderer::new(config).expect("valid config");
    let mut host = RecordingHost::with_video();
    renderer
        .init(&mut AcceptingEnv, &mut host)
        .expect("init succeeds");
    (renderer, host)
}

fn bounce() -> CoreConfig {
    CoreConfig::default().with_mode(CursorMode::Bounce)
}

#[test]
fn bounce_never_leaves_bounds() {
    let (mut renderer, mut host) = running(bounce());
    let max_x = (WIDTH - 20) as i32;

    for _ in 0..5_000 {
        renderer.advance_and_render(&mut host).unwrap();
        let x = renderer.cursor().x;
        assert!((0..=max_x).contains(&x), "x = {x} escaped [0, {max_x}]");
    }
}

#[test]
fn bounce_reaches_the_right_edge_after_300_frames() {
    let (mut renderer, mut host) = running(bounce());

    for _ in 0..299 {
        renderer.advance_and_render(&mut host).unwrap();
    }
    assert_eq!(renderer.cursor().flips, 0);

    renderer.advance_and_render(&mut host).unwrap();
    assert_eq!(renderer.cursor().x, 300);
    assert_eq!(renderer.cursor().flips, 1);
}

#[test]
fn corner_rectangle_writes_one_cell() {
    let mut fb = FrameBuffer::new(WIDTH, HEIGHT, BLACK);
    fb.draw_rectangle(WIDTH as i32 - 1, HEIGHT as i32 - 1, 20, 20, RED);

    let lit: Vec<usize> = fb
        .pixels()
        .iter()
        .enumerate()
        .filter(|(_, &p)| p != BLACK)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(lit, vec![(WIDTH * HEIGHT - 1) as usize]);
}

#[test]
fn unprintable_glyph_leaves_buffer_unchanged() {
    let mut fb = FrameBuffer::new(WIDTH, HEIGHT, BLACK);
    fb.draw_text(0, 0, "seed", WHITE);
    let before = fb.clone();

    for ch in ['\u{0}', '\u{1f}', '\u{7f}', '\u{80}', 'ß'] {
        assert!(!fb.draw_glyph(10, 10, ch, RED));
    }
    assert_eq!(fb, before);
}

#[test]
fn clear_restores_the_post_init_buffer() {
    let (mut renderer, mut host) = running(CoreConfig::default());
    let after_init = renderer.framebuffer().unwrap().clone();

    host.held = vec![Button::Right, Button::Down];
    for _ in 0..25 {
        renderer.advance_and_render(&mut host).unwrap();
    }
    assert_ne!(renderer.framebuffer().unwrap(), &after_init);

    renderer.clear();
    assert_eq!(renderer.framebuffer().unwrap(), &after_init);
}

#[test]
fn hello_world_touches_only_its_glyph_bits() {
    let text = "Hello World";
    let mut fb = FrameBuffer::new(WIDTH, HEIGHT, BLACK);
    fb.draw_text(50, 50, text, WHITE);

    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            let inside = (50..58).contains(&y) && (50..50 + 11 * 8).contains(&x);
            let expected = if inside {
                let ch = text.chars().nth(((x - 50) / 8) as usize).unwrap();
                let row = font::glyph(ch).unwrap()[(y - 50) as usize];
                row.get_bit(((x - 50) % 8) as usize)
            } else {
                false
            };
            let actual = fb.pixel(x, y) == Some(WHITE);
            assert_eq!(actual, expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn null_video_sink_means_no_delivery() {
    let mut renderer = Renderer::default();
    let mut host = RecordingHost::default();
    renderer.init(&mut AcceptingEnv, &mut host).unwrap();

    assert!(renderer.advance_and_render(&mut host).is_err());
    assert!(host.deliveries.is_empty());
    assert_eq!(renderer.phase(), Phase::Running);
}

#[test]
fn delivered_frame_has_fixed_geometry() {
    let (mut renderer, mut host) = running(CoreConfig::default());
    renderer.advance_and_render(&mut host).unwrap();

    let frame = &host.deliveries[0];
    assert_eq!((frame.width, frame.height), (320, 240));
    assert_eq!(frame.pitch, 640);
    assert_eq!(frame.pixels.len(), 320 * 240);
    // square at the origin, text at (50, 50)
    assert_eq!(frame.pixels[0], RED);
    assert_eq!(frame.pixels[19 * 320 + 19], RED);
    assert_eq!(frame.pixels[20 * 320 + 20], BLACK);
}

#[test]
fn input_mode_follows_the_dpad_and_clamps() {
    let (mut renderer, mut host) = running(CoreConfig::default());

    host.held = vec![Button::Left, Button::Up];
    renderer.advance_and_render(&mut host).unwrap();
    assert_eq!((renderer.cursor().x, renderer.cursor().y), (0, 0));

    host.held = vec![Button::Right];
    for _ in 0..400 {
        renderer.advance_and_render(&mut host).unwrap();
    }
    assert_eq!(renderer.cursor().x, 300);

    host.held = vec![Button::Left, Button::Right, Button::Down];
    renderer.advance_and_render(&mut host).unwrap();
    assert_eq!((renderer.cursor().x, renderer.cursor().y), (300, 1));
    assert_eq!(host.polls, 402);
}

#[test]
fn independent_instances_do_not_share_state() {
    let (mut a, mut host_a) = running(bounce());
    let (mut b, mut host_b) = running(CoreConfig::default());

    for _ in 0..10 {
        a.advance_and_render(&mut host_a).unwrap();
    }
    b.advance_and_render(&mut host_b).unwrap();

    assert_eq!(a.cursor().x, 10);
    assert_eq!(b.cursor().x, 0);
    assert_eq!(a.frame_count(), 10);
    assert_eq!(b.frame_count(), 1);
}

#[test]
fn extreme_config_values_never_fault() {
    let config = CoreConfig {
        cursor_mode: CursorMode::Bounce,
        step: i32::MAX,
        start_x: 150,
        text_x: i32::MAX - 4,
        text_y: i32::MIN,
        ..CoreConfig::default()
    };
    let (mut renderer, mut host) = running(config);

    for _ in 0..4 {
        renderer.advance_and_render(&mut host).unwrap();
    }
    // pinned to alternating edges: 300, 0, 300, 0
    assert_eq!(renderer.cursor().x, 0);
    assert_eq!(renderer.cursor().flips, 4);

    // only the square is visible, the text is entirely off-buffer
    let lit = host.deliveries[3].pixels.iter().filter(|&&p| p != BLACK).count();
    assert_eq!(lit, 20 * 20);
}
