use std::time::Duration;

use log::{debug, error, info};
use macroquad::prelude::*;

use rossler_attractor::{
    ControlEvent, DrawCall, OrbitCamera, Param, Renderer, Visualizer, VisualizerConfig,
};

const UI_AREA_HEIGHT: f32 = 100.0;  // Height reserved for the control panel at the bottom
const STATS_INTERVAL: u32 = 60;  // Frames between stats log lines

struct MacroquadRenderer;

impl Renderer for MacroquadRenderer {
    fn draw_polyline(&mut self, call: &DrawCall<'_>) {
        for (start, end) in call.segments() {
            draw_line_3d(start, end, call.color);
        }
    }
}

struct Button {
    rect: Rect,
    label: String,
    event: ControlEvent,
    active: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Rössler Attractor".to_owned(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

fn draw_command_summary() {
    let y_start = 20.0;
    let line_height = 20.0;
    let x_pos = 10.0;
    let lines = [
        "Rössler Attractor Controls:",
        "1 / 2 - Decrease / increase a",
        "3 / 4 - Decrease / increase b",
        "5 / 6 - Decrease / increase c",
        "R     - Reset parameters",
        "Space - Restart drawing",
        "L     - Toggle looping",
        "P     - Pause/unpause",
        "Drag  - Orbit, wheel to zoom",
        "/     - Toggle help display",
        "Q     - Quit program",
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text_improved(line, x_pos, y_start + line_height * i as f32, 20.0, WHITE);
    }
}

// Helper function for better text rendering
fn draw_text_improved(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    draw_text(text, x, y, font_size, color);
}

fn key_events() -> Vec<ControlEvent> {
    let bindings = [
        (KeyCode::Key1, ControlEvent::Decrement(Param::A)),
        (KeyCode::Key2, ControlEvent::Increment(Param::A)),
        (KeyCode::Key3, ControlEvent::Decrement(Param::B)),
        (KeyCode::Key4, ControlEvent::Increment(Param::B)),
        (KeyCode::Key5, ControlEvent::Decrement(Param::C)),
        (KeyCode::Key6, ControlEvent::Increment(Param::C)),
        (KeyCode::R, ControlEvent::Reset),
        (KeyCode::Space, ControlEvent::Restart),
        (KeyCode::L, ControlEvent::ToggleLooping),
        (KeyCode::P, ControlEvent::TogglePause),
    ];
    bindings
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, event)| *event)
        .collect()
}

fn layout_buttons(vis: &Visualizer, ui_y: f32) -> Vec<Button> {
    let ui_padding = 15.0;
    let button_height = 28.0;
    let button_spacing = 8.0;
    let small_width = 28.0;
    let group_width = small_width * 2.0 + 150.0 + button_spacing * 2.0;

    let mut buttons = Vec::new();
    for (i, param) in Param::ALL.iter().enumerate() {
        let x = ui_padding + i as f32 * (group_width + button_spacing * 2.0);
        buttons.push(Button {
            rect: Rect::new(x, ui_y + 10.0, small_width, button_height),
            label: "-".to_owned(),
            event: ControlEvent::Decrement(*param),
            active: false,
        });
        buttons.push(Button {
            rect: Rect::new(x + group_width - small_width, ui_y + 10.0, small_width, button_height),
            label: "+".to_owned(),
            event: ControlEvent::Increment(*param),
            active: false,
        });
    }

    let row_y = ui_y + 10.0 + button_height + 12.0;
    let actions = [
        ("Reset", 65.0, ControlEvent::Reset, false),
        ("Restart", 75.0, ControlEvent::Restart, false),
        ("Loop", 55.0, ControlEvent::ToggleLooping, vis.reveal().is_looping()),
        (if vis.is_paused() { "Resume" } else { "Pause" }, 70.0, ControlEvent::TogglePause, vis.is_paused()),
    ];
    let mut x = ui_padding;
    for (label, width, event, active) in actions {
        buttons.push(Button {
            rect: Rect::new(x, row_y, width, button_height),
            label: label.to_owned(),
            event,
            active,
        });
        x += width + button_spacing;
    }
    buttons
}

fn help_button_rect(ui_y: f32) -> Rect {
    Rect::new(screen_width() - 50.0, ui_y + 10.0, 35.0, 28.0)
}

fn draw_panel(vis: &Visualizer, buttons: &[Button], ui_y: f32) {
    let panel_color = Color::new(0.08, 0.08, 0.1, 0.9);
    let button_bg_color = Color::new(0.15, 0.15, 0.2, 0.95);
    let button_active_color = Color::new(0.25, 0.25, 0.35, 0.95);
    let text_color = WHITE;

    draw_rectangle(0.0, ui_y, screen_width(), UI_AREA_HEIGHT, panel_color);

    for button in buttons {
        let color = if button.active { button_active_color } else { button_bg_color };
        draw_rectangle(button.rect.x, button.rect.y, button.rect.w, button.rect.h, color);
        let text_y = button.rect.y + (button.rect.h + 16.0) / 2.0;  // Center text vertically
        draw_text_improved(&button.label, button.rect.x + 8.0, text_y, 16.0, text_color);
    }

    // Live values sit between each -/+ pair; committed values show while a commit waits.
    let live = vis.session().live();
    let committed = vis.session().committed();
    for pair in buttons.chunks(2).take(Param::ALL.len()) {
        if let ControlEvent::Decrement(param) = pair[0].event {
            let value = live.get(param);
            let text = if vis.session().is_pending() && value != committed.get(param) {
                format!("{} = {:.1} ({:.1})", param.label(), value, committed.get(param))
            } else {
                format!("{} = {:.1}", param.label(), value)
            };
            let text_y = pair[0].rect.y + (pair[0].rect.h + 16.0) / 2.0;
            draw_text_improved(&text, pair[0].rect.x + pair[0].rect.w + 12.0, text_y, 18.0, text_color);
        }
    }

    let help = help_button_rect(ui_y);
    draw_rectangle(help.x, help.y, help.w, help.h, button_bg_color);
    draw_text_improved("?", help.x + 12.0, help.y + (help.h + 16.0) / 2.0, 16.0, text_color);

    let status = format!(
        "{}/{} points",
        vis.reveal().visible_count(),
        vis.trajectory().len()
    );
    draw_text_improved(&status, screen_width() - 220.0, ui_y + 70.0, 16.0, text_color);
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = VisualizerConfig::from_env().unwrap_or_else(|e| {
        error!("{}; falling back to defaults", e);
        VisualizerConfig::default()
    });

    let mut vis = Visualizer::new(config);
    let mut camera = OrbitCamera::new(config.camera);
    let mut renderer = MacroquadRenderer;
    let mut show_help = false;
    let mut dragging = false;
    let mut last_mouse = mouse_position();
    let mut frame_count: u32 = 0;
    let mut last_fps_time = get_time();

    loop {
        let now = Duration::from_secs_f64(get_time());
        let ui_y = screen_height() - UI_AREA_HEIGHT;
        let buttons = layout_buttons(&vis, ui_y);

        if is_key_pressed(KeyCode::Q) {
            info!("Quit requested");
            break;
        }

        for event in key_events() {
            vis.handle(event, now);
        }

        if is_key_pressed(KeyCode::Slash) {
            show_help = !show_help;
            debug!("Help display toggled: {}", if show_help { "shown" } else { "hidden" });
        }

        let mouse_pos = mouse_position();
        let over_panel = mouse_pos.1 >= ui_y;
        if is_mouse_button_pressed(MouseButton::Left) {
            let point = vec2(mouse_pos.0, mouse_pos.1);
            if let Some(button) = buttons.iter().find(|b| b.rect.contains(point)) {
                vis.handle(button.event, now);
            } else if help_button_rect(ui_y).contains(point) {
                show_help = !show_help;
                debug!("Help display toggled: {}", if show_help { "shown" } else { "hidden" });
            } else if !over_panel {
                dragging = true;
            }
        }
        if !is_mouse_button_down(MouseButton::Left) {
            dragging = false;
        }
        if dragging {
            camera.drag(mouse_pos.0 - last_mouse.0, mouse_pos.1 - last_mouse.1, ui_y);
        }
        last_mouse = mouse_pos;

        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 && !over_panel {
            camera.zoom(wheel_y.signum());
        }
        camera.update();

        clear_background(BLACK);
        set_camera(&Camera3D {
            position: camera.position(),
            target: camera.target(),
            up: vec3(0.0, 1.0, 0.0),
            ..Default::default()
        });
        vis.frame(now, &mut renderer);

        set_default_camera();
        draw_panel(&vis, &buttons, ui_y);
        if show_help {
            draw_command_summary();
        }

        frame_count += 1;
        if frame_count % STATS_INTERVAL == 0 {
            let current_time = get_time();
            let elapsed = current_time - last_fps_time;
            last_fps_time = current_time;
            debug!("FPS: {:.1}", STATS_INTERVAL as f64 / elapsed);
            debug!("Frame time: {:.2}ms", elapsed * 1000.0 / STATS_INTERVAL as f64);
            debug!("{}", vis.describe());
        }

        next_frame().await
    }

    vis.teardown();
}
