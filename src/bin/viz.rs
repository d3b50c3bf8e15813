use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use booster_trade::config::EngineConstants;
use booster_trade::error::ModelError;
use booster_trade::study::{ConfigurationReport, TradeStudy};
use booster_trade::vehicle::{presets, Configuration, ConfigurationBuilder};

const STAGE_COLORS: [Color32; 3] = [Color32::RED, Color32::GREEN, Color32::BLUE];
const STACK_WIDTH: f32 = 100.0;
const PAYLOAD_SIDE: f32 = 100.0;

fn main() -> eframe::Result {
    env_logger::init();
    let app = TradeViz::new(EngineConstants::default());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 1000.0]),
        ..Default::default()
    };
    eframe::run_native("Booster Trade Study", options, Box::new(|_| Ok(Box::new(app))))
}

/// Editable inputs; the study is rebuilt from these whenever one changes.
#[derive(Debug, Clone, PartialEq)]
struct Inputs {
    optimized: [f64; 3],
    burn_time: f64,
    pop_out_upper: [f64; 2],
}

impl Inputs {
    fn configurations(&self) -> (Configuration, Configuration) {
        let optimized = ConfigurationBuilder::new(presets::optimized().name)
            .first_stage_ratio(self.optimized[0])
            .stage(self.optimized[1])
            .stage(self.optimized[2])
            .build();
        let pop_out = ConfigurationBuilder::new(presets::pop_out().name)
            .burn_time(self.burn_time)
            .stage(self.pop_out_upper[0])
            .stage(self.pop_out_upper[1])
            .build();
        (optimized, pop_out)
    }
}

struct TradeViz {
    constants: EngineConstants,
    inputs: Inputs,
    study: Result<TradeStudy, ModelError>,
}

impl TradeViz {
    fn new(constants: EngineConstants) -> Self {
        let inputs = Inputs {
            optimized: [0.9; 3],
            burn_time: 10.0,
            pop_out_upper: [0.9; 2],
        };
        let mut app = TradeViz {
            constants,
            inputs,
            study: Err(ModelError::NoStages),
        };
        app.recompute();
        app
    }

    /// Replace the previous study outright; a rejected input leaves nothing to draw.
    fn recompute(&mut self) {
        let (optimized, pop_out) = self.inputs.configurations();
        self.study = TradeStudy::run(&optimized, &pop_out, &self.constants);
        if let Err(e) = &self.study {
            log::warn!("rejected inputs: {}", e);
        }
    }
}

impl eframe::App for TradeViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let before = self.inputs.clone();

        egui::SidePanel::left("inputs").show(ctx, |ui| {
            ui.heading("Optimized Rocket");
            for (i, r) in self.inputs.optimized.iter_mut().enumerate() {
                ratio_field(ui, &format!("Stage {} mass ratio", i + 1), r);
            }
            ui.separator();
            ui.heading("Pop-Out Booster");
            ui.horizontal(|ui| {
                ui.label("First stage burn time (s)");
                ui.add(egui::DragValue::new(&mut self.inputs.burn_time).speed(0.1));
            });
            for (i, r) in self.inputs.pop_out_upper.iter_mut().enumerate() {
                ratio_field(ui, &format!("Stage {} mass ratio", i + 2), r);
            }
        });

        if self.inputs != before {
            self.recompute();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| match &self.study {
            Ok(study) => {
                ui.heading(format!(
                    "Optimized: {:.3} m/s, {:.3} m  |  Pop-out: {:.3} m/s, {:.3} m",
                    study.optimized.total_delta_v(),
                    study.optimized.range(),
                    study.pop_out.total_delta_v(),
                    study.pop_out.range(),
                ));
                ui.label(format!(
                    "The pop-out booster is {}% efficient in velocity and {}% efficient in range.",
                    study.delta_v_efficiency_pct, study.range_efficiency_pct
                ));
            }
            Err(e) => {
                ui.colored_label(Color32::LIGHT_RED, format!("Invalid inputs: {}", e));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Ok(study) = &self.study else {
                return;
            };
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let plot_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Change in Velocity (m/s)");
                    stage_plot(ui, "velocity", half_w, plot_h, study, |r| {
                        &r.performance.cumulative_delta_v
                    });
                });
                ui.vertical(|ui| {
                    ui.label("Range (m)");
                    stage_plot(ui, "range", half_w, plot_h, study, |r| {
                        &r.performance.cumulative_range
                    });
                });
            });

            ui.horizontal(|ui| {
                draw_stack(ui, &study.optimized, &self.constants);
                draw_stack(ui, &study.pop_out, &self.constants);
            });
        });
    }
}

fn ratio_field(ui: &mut egui::Ui, label: &str, value: &mut f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).speed(0.001).range(0.0..=1.2).max_decimals(3));
    });
}

/// Cumulative series against stage mass ratio, one line per configuration.
fn stage_plot(
    ui: &mut egui::Ui,
    id: &str,
    width: f32,
    height: f32,
    study: &TradeStudy,
    series: impl Fn(&ConfigurationReport) -> &Vec<f64>,
) {
    let points = |report: &ConfigurationReport| -> Vec<[f64; 2]> {
        report
            .mass_ratios
            .iter()
            .zip(series(report))
            .map(|(r, v)| [*r, *v])
            .collect()
    };
    Plot::new(id)
        .width(width)
        .height(height)
        .x_axis_label("Stage Mass Ratio")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (report, color) in [(&study.optimized, Color32::BLUE), (&study.pop_out, Color32::RED)] {
                let line: PlotPoints = points(report).into_iter().collect();
                plot_ui.line(Line::new(report.name.clone(), line).color(color));
            }
        });
}

/// Stage 1 on top down to the payload cone, heights from the proportional layout.
fn draw_stack(ui: &mut egui::Ui, report: &ConfigurationReport, constants: &EngineConstants) {
    let scale = (ui.available_height() - PAYLOAD_SIDE - 60.0).max(100.0) / constants.stack_budget as f32;
    let size = Vec2::new(STACK_WIDTH + 220.0, constants.stack_budget as f32 * scale + PAYLOAD_SIDE + 60.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let font = FontId::proportional(12.0);
    let text = ui.visuals().text_color();

    let origin = response.rect.min + Vec2::new(10.0, 20.0);
    painter.text(
        origin - Vec2::new(0.0, 14.0),
        Align2::LEFT_TOP,
        format!("{}  |  Diameter = {} m", report.name, constants.stage_diameter),
        font.clone(),
        text,
    );

    let mut y = origin.y + 10.0;
    for (i, len) in report.stack.stage_lengths.iter().enumerate() {
        let h = *len as f32 * scale;
        let rect = Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(STACK_WIDTH, h));
        painter.rect_filled(rect, 0.0, STAGE_COLORS[i % STAGE_COLORS.len()]);
        painter.text(
            Pos2::new(rect.right() + 25.0, rect.center().y),
            Align2::LEFT_CENTER,
            format!("Stack length = {:.3} m", report.stack.stage_lengths_m[i]),
            font.clone(),
            text,
        );
        y += h;
    }

    // Payload cone hangs below the last stage.
    let apex_drop = 3f32.sqrt() * PAYLOAD_SIDE / 2.0;
    let left = Pos2::new(origin.x, y);
    let right = Pos2::new(origin.x + PAYLOAD_SIDE, y);
    let apex = Pos2::new(origin.x + PAYLOAD_SIDE / 2.0, y + apex_drop);
    painter.add(Shape::convex_polygon(vec![left, right, apex], Color32::YELLOW, Stroke::NONE));
    painter.text(
        Pos2::new(right.x + 25.0, y + apex_drop / 2.0),
        Align2::LEFT_CENTER,
        format!("Payload = {} kg", report.stack.payload_mass),
        font,
        text,
    );
}
