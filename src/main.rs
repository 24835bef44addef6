mod image_loader;

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, Pos2, Rect, Stroke, Vec2};
use image_board::flow::{self, Placement};
use image_board::{
    Command, Editor, EditorConfig, Geometry, Handle, ImageKey, Justification, Point,
    VerticalAlign,
};
use image_loader::TextureCache;

const HANDLE_THICKNESS: f32 = 10.0;
const BUTTON_SIZE: f32 = 24.0;
const PADDING: f32 = 6.0;
const URL_FIELD_HEIGHT: f32 = 22.0;

#[derive(Parser, Debug)]
#[command(name = "image_board", about = "Arrange, remove and resize images in a flow grid")]
struct Cli {
    /// JSON file overriding the layout constants.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path).unwrap_or_else(|err| {
            log::error!("{err}; falling back to the default layout");
            EditorConfig::default()
        }),
        None => EditorConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Image Board"),
        ..Default::default()
    };
    eframe::run_native(
        "ImageBoard",
        options,
        Box::new(|_cc| Ok(Box::new(BoardApp::new(config)))),
    )
}

// --- App ---

struct BoardApp {
    editor: Editor,
    textures: TextureCache,
    /// Commands gathered while drawing a frame, applied once it is done.
    pending: Vec<Command>,
}

impl BoardApp {
    fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
            textures: TextureCache::default(),
            pending: Vec::new(),
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.poll(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.board(ui);
            });
        });

        // Release anywhere ends the gesture, even outside the image.
        if self.editor.drag().is_dragging() {
            let (pointer, released) =
                ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
            if let Some(p) = pointer {
                self.pending.push(Command::PointerMove(Point::new(p.x, p.y)));
            }
            if released {
                self.pending.push(Command::PointerUp);
            }
            ctx.request_repaint();
        }

        for command in self.pending.drain(..) {
            self.editor.apply(command);
        }

        let in_use: HashSet<&str> = self
            .editor
            .store()
            .entries()
            .map(|e| e.record.url.as_str())
            .collect();
        self.textures.retain_urls(&in_use);
    }
}

// --- Drawing ---

impl BoardApp {
    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let enabled = self.editor.controls_enabled();
        let settings = *self.editor.settings();
        ui.horizontal(|ui| {
            for justification in Justification::ALL {
                let selected = settings.justification == justification;
                let label = egui::SelectableLabel::new(selected, justification.label());
                if ui.add_enabled(enabled, label).clicked() {
                    self.pending.push(Command::SetJustification(justification));
                }
            }
            ui.separator();
            let margins = egui::SelectableLabel::new(settings.margins_enabled, "Margins");
            if ui.add_enabled(enabled, margins).clicked() {
                self.pending.push(Command::ToggleMargins);
            }
            let borders = egui::SelectableLabel::new(settings.borders_enabled, "Borders");
            if ui.add_enabled(enabled, borders).clicked() {
                self.pending.push(Command::ToggleBorders);
            }
            ui.separator();
            if ui.button("Add an image").clicked() {
                self.pending.push(Command::AddImage);
            }
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        if (width - self.editor.container_width()).abs() > f32::EPSILON {
            self.pending.push(Command::ContainerResized(width));
        }

        let layout = self.editor.layout();

        let grid_height = flow::extent_height(&layout.displayed);
        let (grid_rect, _) =
            ui.allocate_exact_size(vec2(width, grid_height), egui::Sense::hover());
        for placement in &layout.displayed {
            if let Some(geometry) = layout.geometry.get(&placement.key) {
                self.displayed_image(ui, grid_rect.min, placement, geometry);
            }
        }

        if layout.removed.is_empty() {
            return;
        }
        ui.add_space(PADDING * 4.0);
        ui.label("Removed images");
        let strip_height = flow::extent_height(&layout.removed);
        let (strip_rect, _) =
            ui.allocate_exact_size(vec2(width, strip_height), egui::Sense::hover());
        for placement in &layout.removed {
            self.removed_image(ui, strip_rect.min, placement);
        }
    }

    fn displayed_image(
        &mut self,
        ui: &mut egui::Ui,
        container_min: Pos2,
        placement: &Placement,
        geometry: &Geometry,
    ) {
        let key = &placement.key;
        let Some(record) = self.editor.store().get(key).cloned() else {
            return;
        };
        let rect = content_rect(container_min, placement);
        let painter = ui.painter();

        let lightness = geometry.shade.map_or(0.9, |s| s.lightness / 100.0);
        painter.rect_filled(rect, 0.0, Color32::from_gray((lightness * 255.0) as u8));
        if let Some(texture) = self.textures.get(ui.ctx(), &record.url) {
            painter.image(
                texture,
                rect,
                Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        if let Some(border) = geometry.border {
            painter.rect_stroke(rect, 0.0, Stroke::new(border.width, Color32::BLACK));
        }

        let top_right = rect.right_top();
        let close_rect = Rect::from_min_size(
            top_right + vec2(-BUTTON_SIZE - PADDING, PADDING),
            Vec2::splat(BUTTON_SIZE),
        );
        if ui.put(close_rect, egui::Button::new("✕")).clicked() {
            self.pending.push(Command::Remove(key.clone()));
        }

        let center = rect.center();
        let up_rect = Rect::from_center_size(
            center - vec2(0.0, URL_FIELD_HEIGHT + BUTTON_SIZE / 2.0),
            Vec2::splat(BUTTON_SIZE),
        );
        let down_rect = Rect::from_center_size(
            center + vec2(0.0, URL_FIELD_HEIGHT + BUTTON_SIZE / 2.0),
            Vec2::splat(BUTTON_SIZE),
        );
        let up = egui::SelectableLabel::new(record.align == VerticalAlign::Start, "⬆");
        if ui.put(up_rect, up).clicked() {
            self.pending.push(Command::SetAlign {
                key: key.clone(),
                align: VerticalAlign::Start,
            });
        }
        let down = egui::SelectableLabel::new(record.align == VerticalAlign::End, "⬇");
        if ui.put(down_rect, down).clicked() {
            self.pending.push(Command::SetAlign {
                key: key.clone(),
                align: VerticalAlign::End,
            });
        }

        let field_width = (rect.width() - BUTTON_SIZE * 3.0 - PADDING * 4.0).max(BUTTON_SIZE);
        let url_rect = Rect::from_center_size(center, vec2(field_width, URL_FIELD_HEIGHT));
        let mut url = record.url.clone();
        let field = egui::TextEdit::singleline(&mut url)
            .id(ui.make_persistent_id(("url", key.as_str())))
            .hint_text("Paste the Image URL");
        if ui.put(url_rect, field).changed() {
            self.pending.push(Command::SetUrl {
                key: key.clone(),
                url,
            });
        }
        let browse_rect = Rect::from_min_size(
            url_rect.right_top() + vec2(PADDING, 0.0),
            vec2(BUTTON_SIZE * 2.5, URL_FIELD_HEIGHT),
        );
        if ui.put(browse_rect, egui::Button::new("Browse…")).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Image", &["png", "jpg", "jpeg", "gif", "webp"])
                .pick_file()
            {
                self.pending.push(Command::SetUrl {
                    key: key.clone(),
                    url: path.to_string_lossy().into_owned(),
                });
            }
        }

        self.resize_handles(ui, key, rect);
    }

    fn resize_handles(&mut self, ui: &mut egui::Ui, key: &ImageKey, rect: Rect) {
        let t = HANDLE_THICKNESS;
        let handles = [
            (
                Handle::Right,
                Rect::from_min_max(
                    pos2(rect.max.x - t, rect.min.y),
                    pos2(rect.max.x, rect.max.y - t),
                ),
                egui::CursorIcon::ResizeHorizontal,
            ),
            (
                Handle::Down,
                Rect::from_min_max(
                    pos2(rect.min.x, rect.max.y - t),
                    pos2(rect.max.x - t, rect.max.y),
                ),
                egui::CursorIcon::ResizeVertical,
            ),
            (
                Handle::Corner,
                Rect::from_min_max(rect.max - Vec2::splat(t), rect.max),
                egui::CursorIcon::ResizeNwSe,
            ),
        ];
        let dragging = self.editor.drag().active_image() == Some(key);
        for (handle, handle_rect, cursor) in handles {
            let id = ui.make_persistent_id((key.as_str(), format!("{handle:?}")));
            let response = ui
                .interact(handle_rect, id, egui::Sense::drag())
                .on_hover_cursor(cursor);
            if response.hovered() || dragging {
                ui.painter()
                    .rect_filled(handle_rect, 0.0, Color32::from_white_alpha(60));
            }
            if response.drag_started() {
                self.pending.push(Command::PointerDown {
                    key: key.clone(),
                    handle,
                    origin: Point::new(rect.min.x, rect.min.y),
                });
            }
        }
    }

    fn removed_image(&mut self, ui: &mut egui::Ui, container_min: Pos2, placement: &Placement) {
        let key = &placement.key;
        let Some(url) = self.editor.store().get(key).map(|r| r.url.clone()) else {
            return;
        };
        let rect = content_rect(container_min, placement);
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, Color32::GRAY);
        if let Some(texture) = self.textures.get(ui.ctx(), &url) {
            painter.image(
                texture,
                rect,
                Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(128));
        painter.text(
            rect.left_top() + Vec2::splat(PADDING),
            Align2::LEFT_TOP,
            &url,
            egui::FontId::proportional(10.0),
            Color32::LIGHT_GRAY,
        );

        let button_rect =
            Rect::from_center_size(rect.center(), vec2(rect.width().min(80.0), 24.0));
        if ui.put(button_rect, egui::Button::new("Put back")).clicked() {
            self.pending.push(Command::PutBack(key.clone()));
        }
    }
}

fn content_rect(container_min: Pos2, placement: &Placement) -> Rect {
    let (x, y) = placement.content_origin();
    Rect::from_min_size(
        container_min + vec2(x, y),
        vec2(placement.inner.width, placement.inner.height),
    )
}
