// `reveal` - run the site's interactive pieces outside the browser.
//
//   reveal evidence   scrub the grime off the photo with the mouse (R = redo, ESC quits)
//   reveal process    wheel through the pinned three-stage process rail
//   reveal book       post a booking JSON through the mail flow
//
// Logs go to stderr; `book` prints only the response body on stdout.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use reveal_protocol::booking::mailer::{LogMailer, Mailer, ResendMailer};
use reveal_protocol::booking::handle_booking;
use reveal_protocol::compose::{clean_frame, overlay_dirty};
use reveal_protocol::config::SiteConfig;
use reveal_protocol::draw::{
    draw_ring, draw_text_5x7, draw_text_scaled, fill_disc, fill_rect, text_width, Drawer, GLYPH_H,
};
use reveal_protocol::evidence::EvidenceWidget;
use reveal_protocol::gamma::GammaLut;
use reveal_protocol::grime;
use reveal_protocol::scroll::{hero_timeline, HoldSnapPlan, ScrollRange, ScrollTimeline, TextReveal};
use reveal_protocol::types::{pack_rgb, unpack_rgb, FrameBuffer, Point};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const BRAND: u32 = 0x00_55_A5_3B;
const INK: u32 = 0x00_F2_F2_F2;
const DIM: u32 = 0x00_55_55_55;
const PANEL: u32 = 0x00_05_05_05;
const PAGE_BG: u32 = 0x00_0A_0A_0A;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (env vars still override it)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrub-to-reveal window
    Evidence {
        /// Clean photo; the grime is generated from it
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value_t = 960)]
        width: usize,
        #[arg(long, default_value_t = 600)]
        height: usize,
        /// Grime/particle seed
        #[arg(long, default_value_t = 0x5EED)]
        seed: u64,
    },
    /// Pinned process rail driven by the mouse wheel
    Process {
        #[arg(long, default_value_t = 960)]
        width: usize,
        #[arg(long, default_value_t = 600)]
        height: usize,
    },
    /// Submit a booking (JSON from a file or stdin)
    Book {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Log the emails instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse().context("log level directive")?)
        .from_env_lossy();

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format)?;

    let cfg = SiteConfig::load(cli.config.as_deref()).context("loading configuration")?;
    info!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Command::Evidence { image, width, height, seed } => {
            run_evidence(&cfg, image, width, height, seed)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Process { width, height } => {
            run_process(&cfg, width, height)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Book { input, dry_run } => run_book(&cfg, input, dry_run),
    }
}

/* ------------------------------ book ------------------------------ */

fn run_book(cfg: &SiteConfig, input: Option<PathBuf>, dry_run: bool) -> Result<ExitCode> {
    let body = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("reading booking from stdin")?;
            s
        }
    };

    let mailer: Box<dyn Mailer> = if dry_run {
        Box::new(LogMailer)
    } else {
        Box::new(ResendMailer::from_config(cfg).context("setting up the mail provider")?)
    };
    info!(mailer = mailer.name(), "submitting booking");

    let response = handle_booking(&body, mailer.as_ref(), cfg, Local::now().date_naive());
    println!("{}", response.body);
    Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/* ---------------------------- evidence ---------------------------- */

fn run_evidence(cfg: &SiteConfig, image: Option<PathBuf>, width: usize, height: usize, seed: u64) -> Result<()> {
    // A missing or broken photo is not fatal: the widget falls back to a flat backdrop.
    let base = match image.as_deref().map(grime::load_base_image) {
        Some(Ok(img)) => Some(img),
        Some(Err(e)) => {
            warn!(error = %e, "base image unavailable, using fallback grime");
            None
        }
        None => None,
    };

    let mut drawer = Drawer::new("Myra Keleher - Evidence", width, height)?;
    let mut widget = EvidenceWidget::new(cfg.reveal.clone(), width, height, base, seed);
    let lut = GammaLut::new();

    let (mut w, mut h) = (width, height);
    let mut clean = clean_frame(widget.base(), w, h);
    let mut screen = FrameBuffer::new(w, h);

    let mut fps = FpsCounter::new();
    let mut last_frame_time = Instant::now();
    let mut was_down = false;

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // 1) Size changes rebuild everything; R forces the same at the current size.
        let (nw, nh) = drawer.size();
        if (nw, nh) != (w, h) && nw > 0 && nh > 0 {
            (w, h) = (nw, nh);
            widget.resize(w, h);
            clean = clean_frame(widget.base(), w, h);
            screen = FrameBuffer::new(w, h);
        } else if drawer.r_pressed_once() {
            widget.resize(w, h);
        }

        // 2) Pointer. Leaving the window while pressed counts as a release.
        let pos = drawer.mouse_pos().map(|(x, y)| Point::new(x, y));
        let down = drawer.left_mouse_down();
        match pos {
            Some(p) if down && !was_down => widget.pointer_down(p),
            Some(p) if down => widget.pointer_move(p, now),
            _ => {
                if widget.is_pressed() { widget.pointer_up(now); }
            }
        }
        was_down = down;

        // 3) One flush per frame, then compose: clean -> grime -> particles.
        widget.frame(dt, now);
        screen.pixels.copy_from_slice(&clean.pixels);
        overlay_dirty(&mut screen, widget.canvas().layer(), &lut)?;
        widget.particles().render(&mut screen);

        if let Some(p) = pos {
            let r = cfg.reveal.brush_radius as i32;
            draw_ring(&mut screen, p.x as i32, p.y as i32, r, BRAND);
            if widget.is_pressed() {
                fill_disc(&mut screen, p.x as i32, p.y as i32, 3, BRAND);
            }
        }

        draw_evidence_hud(&mut screen, &widget, fps.label());

        drawer.present(&screen)?;
        fps.frame(now);
    }
    info!(purity = widget.purity().percent, complete = widget.purity().is_complete, "evidence window closed");
    Ok(())
}

fn draw_evidence_hud(screen: &mut FrameBuffer, widget: &EvidenceWidget, fps: &str) {
    let (w, h) = (screen.width as i32, screen.height as i32);
    let purity = widget.purity();

    fill_rect(screen, 8, 8, 300, 48, PANEL);
    draw_text_scaled(screen, 16, 14, &format!("PURITY {}%", purity.percent), BRAND, 2);
    draw_text_5x7(screen, 16, 34, widget.status().label(), INK);
    draw_text_5x7(screen, 16, 44, &format!("{} | {fps}", widget.resolution_label()), DIM);

    // purity bar along the bottom edge
    let filled = w * purity.percent as i32 / 100;
    fill_rect(screen, 0, h - 4, w, 4, PANEL);
    fill_rect(screen, 0, h - 4, filled, 4, BRAND);

    if widget.show_hint() {
        let hint = "CLICK AND DRAG TO SCRUB";
        let x = (w - text_width(hint, 2)) / 2;
        draw_text_scaled(screen, x, h / 2 - GLYPH_H, hint, INK, 2);
    }
    if widget.show_banner() {
        let banner = "CERTIFIED CLEAN";
        let tw = text_width(banner, 4);
        let x = (w - tw) / 2;
        let y = h / 2 - 2 * GLYPH_H;
        fill_rect(screen, x - 16, y - 16, tw + 32, 4 * GLYPH_H + 32, PANEL);
        draw_text_scaled(screen, x, y, banner, BRAND, 4);
    }
}

/* ---------------------------- process ----------------------------- */

const STAGE_LABELS: [&str; 3] = ["ASSESSMENT", "DEEP CLEAN", "INSPECTION"];
const HERO_TITLE: &str = "WE DO NOT JUST CLEAN. WE CURATE.";
const WHEEL_PX: f32 = 60.0;

fn run_process(cfg: &SiteConfig, width: usize, height: usize) -> Result<()> {
    let p = &cfg.process;
    let plan = HoldSnapPlan::new(p.stages, p.hold_ratio, p.snap_ratio)?;
    let rail = plan.timeline(-100.0 / p.stages as f32)?;
    let hero = hero_timeline()?;
    let reveal = TextReveal::default();

    let mut drawer = Drawer::new("Myra Keleher - Process", width, height)?;
    let mut screen = FrameBuffer::new(width, height);
    let mut scroll_y = 0.0f32;
    let mut fps = FpsCounter::new();

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) && w > 0 && h > 0 {
            screen = FrameBuffer::new(w, h);
        }
        let vh = screen.height as f32;

        // Page: a one-viewport hero, then the pinned section.
        let section_top = vh;
        let section_h = p.viewport_heights * vh;
        let max_scroll = section_top + section_h - vh;
        scroll_y = (scroll_y - drawer.scroll_wheel() * WHEEL_PX).clamp(0.0, max_scroll);

        let hero_p = ScrollRange::Exit.progress(scroll_y, 0.0, vh, vh);
        let rail_p = ScrollRange::Pinned.progress(scroll_y, section_top, section_h, vh);

        screen.fill(PAGE_BG);
        if scroll_y < vh {
            draw_hero(&mut screen, &reveal, hero_p, hero.value("opacity", hero_p).unwrap_or(1.0), scroll_y);
        }
        draw_rail(&mut screen, &plan, &rail, rail_p, (section_top - scroll_y).max(0.0) as i32);

        let blur = hero.value("blur", hero_p).unwrap_or(0.0);
        let hud = format!(
            "HERO {:.2} BLUR {:.1} | RAIL {:.3} STAGE {} | {}",
            hero_p, blur, rail_p, plan.stage_at(rail_p) + 1, fps.label()
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, DIM);

        drawer.present(&screen)?;
        fps.frame(now);
    }
    Ok(())
}

/// Hero title: each character brightens as the reveal scrubs past it, and the
/// whole block fades with the hero's opacity track.
fn draw_hero(screen: &mut FrameBuffer, reveal: &TextReveal, progress: f32, opacity: f32, scroll_y: f32) {
    let scale = 3;
    let count = HERO_TITLE.chars().count();
    let x0 = (screen.width as i32 - text_width(HERO_TITLE, scale)) / 2;
    let y = screen.height as i32 / 2 - scroll_y as i32;
    let mut x = x0;
    for (i, ch) in HERO_TITLE.chars().enumerate() {
        let k = reveal.char_progress(progress, i, count);
        let color = lerp_rgb(lerp_rgb(DIM, INK, k), PAGE_BG, 1.0 - opacity);
        let mut buf = [0u8; 4];
        draw_text_scaled(screen, x, y, ch.encode_utf8(&mut buf), color, scale);
        x += text_width(" ", scale);
    }
}

/// Horizontal rail of stage panels shifted by the `offset` track, plus one
/// fill bar per stage driven by its `fill{i}` track.
fn draw_rail(
    screen: &mut FrameBuffer,
    plan: &HoldSnapPlan,
    rail: &ScrollTimeline,
    progress: f32,
    top: i32,
) {
    let (w, h) = (screen.width as i32, screen.height as i32);
    let stages = plan.stages();
    let offset = rail.value("offset", progress).unwrap_or(0.0);
    // offset is a percentage of the whole rail (stages * viewport width)
    let rail_w = w * stages as i32;
    let shift = (offset / 100.0 * rail_w as f32) as i32;

    for i in 0..stages {
        let x = shift + i as i32 * w;
        let shade = if i % 2 == 0 { 0x00_12_12_12 } else { 0x00_18_18_18 };
        fill_rect(screen, x, top, w, h, shade);
        let label = STAGE_LABELS.get(i).map(|s| s.to_string()).unwrap_or_else(|| format!("STAGE {}", i + 1));
        draw_text_scaled(screen, x + 48, top + h / 3, &format!("0{}", i + 1), BRAND, 3);
        draw_text_scaled(screen, x + 48, top + h / 3 + 36, &label, INK, 4);

        // laser sweep down the panel during this stage's hold
        let fill = rail.value(&format!("fill{i}"), progress).unwrap_or(0.0) / 100.0;
        let laser_y = top + (fill * h as f32) as i32;
        fill_rect(screen, x, laser_y, w, 2, BRAND);
    }

    // stage progress bars pinned to the bottom
    let bar_w = (w - 32 - 16 * (stages as i32 - 1)) / stages as i32;
    for i in 0..stages {
        let bx = 16 + i as i32 * (bar_w + 16);
        let by = (top + h - 24).min(h - 24);
        let fill = rail.value(&format!("fill{i}"), progress).unwrap_or(0.0) / 100.0;
        fill_rect(screen, bx, by, bar_w, 3, 0x00_2A_2A_2A);
        fill_rect(screen, bx, by, (bar_w as f32 * fill) as i32, 3, BRAND);
        let label = STAGE_LABELS.get(i).copied().unwrap_or("");
        draw_text_5x7(screen, bx, by - 12, label, DIM);
    }
}

fn lerp_rgb(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = unpack_rgb(a);
    let (br, bg, bb) = unpack_rgb(b);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    pack_rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/* ------------------------------ FPS ------------------------------- */

struct FpsCounter {
    since: Instant,
    frames: u32,
    label: String,
}

impl FpsCounter {
    fn new() -> Self {
        Self { since: Instant::now(), frames: 0, label: String::from("FPS: 0.0") }
    }

    fn frame(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.duration_since(self.since);
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames as f32 / elapsed.as_secs_f32();
            debug!(fps, "frame rate");
            self.label = format!("FPS: {fps:.1}");
            self.frames = 0;
            self.since = now;
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}
