#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use chrono::{Local, NaiveDate};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use meteor_flux_viewer::{
    astro, catalog, config, encoding,
    fetch::{self, FetchState, SharedFetch},
    i18n,
    query::{format_timestamp, FluxQuery, OutputMode},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en 등)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1000.0, 720.0])
        .with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Meteor Flux Viewer",
        native_options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["fluxviewer.png", "icon.png", "assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 UI 문자열을 표시할 수 있는 시스템 폰트를 찾아 적용한다.
/// 못 찾으면 Err를 반환해 설정에서 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into(),
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into(),
        "/System/Library/Fonts/AppleSDGothicNeo.ttc".into(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for p in candidates {
        if p.exists() {
            let bytes =
                fs::read(&p).map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            return Ok(());
        }
    }
    Err("CJK font not found. Set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    System,
    Light,
    Dark,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    today: NaiveDate,
    // 질의 폼
    shower_code: String,
    begin_input: String,
    end_input: String,
    count_pos: f64,
    eca_pos: f64,
    duration_lo: f64,
    duration_hi: f64,
    pop_index: f64,
    gamma: f64,
    stations: String,
    ymax_input: String,
    output: OutputMode,
    query_error: Option<String>,
    initial_fetch_pending: bool,
    // 프래그먼트 요청/표시
    fetch_slot: SharedFetch,
    last_url: Option<String>,
    save_status: Option<String>,
    // 설정
    show_settings_modal: bool,
    endpoint_input: String,
    lang_input: String,
    lang_save_status: Option<String>,
    window_alpha: f32,
    theme: ThemeChoice,
    custom_font_path: String,
    font_load_error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let today = Local::now().date_naive();
        let endpoint_input = config.endpoint.clone();
        let lang_input = config.language.clone();
        let window_alpha = config.window_alpha.clamp(0.3, 1.0);
        let gamma = config.query.gamma;
        let stations = config.query.stations.clone();
        let output = config.output_mode();
        let mut s = Self {
            config,
            tr,
            today,
            shower_code: "SPO".into(),
            begin_input: String::new(),
            end_input: String::new(),
            count_pos: encoding::default_count_position(),
            eca_pos: encoding::default_count_position(),
            duration_lo: encoding::default_duration_position(),
            duration_hi: encoding::default_duration_position(),
            pop_index: 2.0,
            gamma,
            stations,
            ymax_input: String::new(),
            output,
            query_error: None,
            initial_fetch_pending: true,
            fetch_slot: fetch::new_shared(),
            last_url: None,
            save_status: None,
            show_settings_modal: false,
            endpoint_input,
            lang_input,
            lang_save_status: None,
            window_alpha,
            theme: ThemeChoice::System,
            custom_font_path: String::new(),
            font_load_error: None,
        };
        s.apply_shower_defaults();
        s
    }

    /// 선택된 유성우의 카탈로그 기본값을 폼에 채운다.
    /// 카탈로그에 없는 코드면 기존 값을 그대로 둔다.
    fn apply_shower_defaults(&mut self) {
        if let Some(d) = catalog::shower_defaults(&self.shower_code, self.today) {
            if let (Some(begin), Some(end)) = (d.begin.and_hms_opt(0, 0, 0), d.end.and_hms_opt(0, 0, 0)) {
                self.begin_input = format_timestamp(begin);
                self.end_input = format_timestamp(end);
            }
            self.pop_index = d.pop_index;
        }
    }

    /// 폼 상태로 질의 URL을 만든다. 실패 메시지는 사용자 언어로 돌려준다.
    fn build_url(&self) -> Result<url::Url, String> {
        let tr = &self.tr;
        let begin = astro::parse_timestamp(&self.begin_input)
            .ok_or_else(|| tr.t(i18n::keys::ERROR_INVALID_TIMESTAMP).to_string())?;
        let end = astro::parse_timestamp(&self.end_input)
            .ok_or_else(|| tr.t(i18n::keys::ERROR_INVALID_TIMESTAMP).to_string())?;
        let ymax = if self.ymax_input.trim().is_empty() {
            None
        } else {
            Some(
                self.ymax_input
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| tr.t(i18n::keys::ERROR_INVALID_NUMBER).to_string())?,
            )
        };
        let query = FluxQuery {
            shower: self.shower_code.to_uppercase(),
            begin,
            end,
            min_eca: encoding::binned_eca(self.eca_pos),
            min_meteors: encoding::binned_meteors(self.count_pos),
            min_interval: encoding::duration_param(self.duration_lo),
            max_interval: encoding::duration_param(self.duration_hi),
            pop_index: self.pop_index,
            gamma: self.gamma,
            stations: self.stations.clone(),
            output: self.output,
            ymax,
        };
        query.to_url(&self.config.endpoint).map_err(|e| e.to_string())
    }

    /// Update 버튼: 질의를 조립해 백그라운드 요청을 보낸다.
    fn load_plot(&mut self, ctx: &egui::Context) {
        match self.build_url() {
            Ok(url) => {
                self.query_error = None;
                self.last_url = Some(url.to_string());
                let ctx = ctx.clone();
                fetch::spawn_fetch(self.fetch_slot.clone(), url.to_string(), move || {
                    ctx.request_repaint();
                });
            }
            Err(msg) => self.query_error = Some(msg),
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("query_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.form.shower", "Shower"))
                        .on_hover_text(txt(
                            "gui.form.shower_tip",
                            "Catalog showers plus SPO/ANT catch-alls.",
                        ));
                    let selected = selected_shower_label(&self.shower_code);
                    let before = self.shower_code.clone();
                    egui::ComboBox::from_id_source("shower_code")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for code in catalog::SENTINEL_CODES {
                                ui.selectable_value(
                                    &mut self.shower_code,
                                    code.to_string(),
                                    code,
                                );
                            }
                            for record in catalog::showers() {
                                ui.selectable_value(
                                    &mut self.shower_code,
                                    record.code.to_string(),
                                    format!("{} — {}", record.code, record.name),
                                );
                            }
                        });
                    if before != self.shower_code {
                        self.apply_shower_defaults();
                    }
                    ui.end_row();

                    ui.label(txt("gui.form.begin", "Begin (UT)"));
                    ui.add(egui::TextEdit::singleline(&mut self.begin_input).desired_width(200.0));
                    ui.end_row();

                    ui.label(txt("gui.form.end", "End (UT)"));
                    ui.add(egui::TextEdit::singleline(&mut self.end_input).desired_width(200.0));
                    ui.end_row();

                    ui.label(txt("gui.form.popindex", "Population index r"));
                    ui.add(egui::DragValue::new(&mut self.pop_index).speed(0.05));
                    ui.end_row();

                    ui.label(txt("gui.form.gamma", "Gamma"));
                    ui.add(egui::DragValue::new(&mut self.gamma).speed(0.05));
                    ui.end_row();

                    ui.label(txt("gui.form.stations", "Stations"))
                        .on_hover_text(txt(
                            "gui.form.stations_tip",
                            "Comma-separated station codes; empty = all stations.",
                        ));
                    ui.add(egui::TextEdit::singleline(&mut self.stations).desired_width(200.0));
                    ui.end_row();

                    ui.label(txt("gui.form.output", "Output"));
                    egui::ComboBox::from_id_source("output_mode")
                        .selected_text(self.output.as_str())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.output, OutputMode::Graph, "graph");
                            ui.selectable_value(&mut self.output, OutputMode::Full, "full");
                        });
                    ui.end_row();

                    ui.label(txt("gui.form.ymax", "Y-axis max"))
                        .on_hover_text(txt("gui.form.ymax_tip", "Empty = automatic."));
                    ui.add(egui::TextEdit::singleline(&mut self.ymax_input).desired_width(80.0));
                    ui.end_row();
                });
        });

        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("slider_grid")
                .num_columns(3)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.slider.meteors", "Min meteors / bin"));
                    ui.add(
                        egui::Slider::new(
                            &mut self.count_pos,
                            encoding::COUNT_SLIDER_MIN..=encoding::COUNT_SLIDER_MAX,
                        )
                        .show_value(false),
                    );
                    ui.label(encoding::binned_meteors(self.count_pos).to_string());
                    ui.end_row();

                    ui.label(txt("gui.slider.eca", "Min ECA / bin"));
                    ui.add(
                        egui::Slider::new(
                            &mut self.eca_pos,
                            encoding::COUNT_SLIDER_MIN..=encoding::COUNT_SLIDER_MAX,
                        )
                        .show_value(false),
                    );
                    ui.label(encoding::eca_label(self.eca_pos));
                    ui.end_row();

                    ui.label(txt("gui.slider.duration_min", "Min bin length"));
                    let lo = ui.add(
                        egui::Slider::new(
                            &mut self.duration_lo,
                            encoding::DURATION_SLIDER_MIN..=encoding::DURATION_SLIDER_MAX,
                        )
                        .show_value(false),
                    );
                    if lo.changed() {
                        self.duration_hi = self.duration_hi.max(self.duration_lo);
                    }
                    ui.label(encoding::format_duration(self.duration_lo));
                    ui.end_row();

                    ui.label(txt("gui.slider.duration_max", "Max bin length"));
                    let hi = ui.add(
                        egui::Slider::new(
                            &mut self.duration_hi,
                            encoding::DURATION_SLIDER_MIN..=encoding::DURATION_SLIDER_MAX,
                        )
                        .show_value(false),
                    );
                    if hi.changed() {
                        self.duration_lo = self.duration_lo.min(self.duration_hi);
                    }
                    ui.label(encoding::format_duration(self.duration_hi));
                    ui.end_row();
                });
        });
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        if let Some(err) = &self.query_error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
        let state = self
            .fetch_slot
            .lock()
            .map(|s| s.clone())
            .unwrap_or(FetchState::Idle);
        match state {
            FetchState::Idle => {}
            FetchState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(txt("gui.status.wait", "Please wait"));
                });
            }
            FetchState::Done { url, body } => {
                ui.horizontal(|ui| {
                    ui.small(&url);
                    if ui.button(txt("gui.result.save", "Save fragment...")).clicked() {
                        self.save_fragment(&body);
                    }
                });
                if let Some(status) = &self.save_status {
                    ui.small(status);
                }
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut body.as_str())
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    });
            }
        }
    }

    fn save_fragment(&mut self, body: &str) {
        let picked = FileDialog::new()
            .set_file_name("flux_fragment.html")
            .save_file();
        if let Some(path) = picked {
            self.save_status = match fs::write(&path, body) {
                Ok(()) => Some(format!("Saved: {}", path.display())),
                Err(e) => Some(format!("Save failed: {e}")),
            };
        }
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(txt("gui.settings.endpoint", "Endpoint"));
                        ui.add(
                            egui::TextEdit::singleline(&mut self.endpoint_input)
                                .desired_width(320.0),
                        );
                        ui.end_row();

                        ui.label(txt("gui.settings.language", "Language"));
                        ui.add(egui::TextEdit::singleline(&mut self.lang_input).desired_width(80.0));
                        ui.end_row();

                        ui.label(txt("gui.settings.alpha", "Window opacity"));
                        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0));
                        ui.end_row();

                        ui.label(txt("gui.settings.theme", "Theme"));
                        ui.horizontal(|ui| {
                            ui.selectable_value(&mut self.theme, ThemeChoice::System, "System");
                            ui.selectable_value(&mut self.theme, ThemeChoice::Light, "Light");
                            ui.selectable_value(&mut self.theme, ThemeChoice::Dark, "Dark");
                        });
                        ui.end_row();

                        ui.label(txt("gui.settings.font", "Custom font"));
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.custom_font_path)
                                    .desired_width(220.0),
                            );
                            if ui.button("...").clicked() {
                                if let Some(path) = FileDialog::new()
                                    .add_filter("font", &["ttf", "ttc", "otf"])
                                    .pick_file()
                                {
                                    self.custom_font_path = path.display().to_string();
                                }
                            }
                            if ui.button(txt("gui.settings.font_apply", "Apply")).clicked() {
                                self.font_load_error =
                                    load_custom_font(ctx, &self.custom_font_path).err();
                            }
                        });
                        ui.end_row();
                    });
                if let Some(err) = &self.font_load_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
                ui.add_space(6.0);
                if ui.button(txt("gui.settings.save", "Save")).clicked() {
                    self.config.endpoint = self.endpoint_input.trim().to_string();
                    self.config.language = self.lang_input.trim().to_lowercase();
                    self.config.window_alpha = self.window_alpha;
                    self.config.query.stations = self.stations.clone();
                    self.config.query.gamma = self.gamma;
                    self.config.query.output = self.output.as_str().into();
                    let lang_code =
                        i18n::resolve_language("auto", Some(self.config.language.as_str()));
                    self.tr = i18n::Translator::new_with_pack(
                        &lang_code,
                        self.config.language_pack_dir.as_deref(),
                    );
                    self.lang_save_status = match self.config.save() {
                        Ok(()) => Some(txt("gui.settings.saved", "Saved.")),
                        Err(e) => Some(format!("{e}")),
                    };
                }
                if let Some(status) = &self.lang_save_status {
                    ui.small(status);
                }
            });
        self.show_settings_modal = open;
    }
}

fn selected_shower_label(code: &str) -> String {
    match catalog::find_shower(code) {
        Some(record) => format!("{} — {}", record.code, record.name),
        None => code.to_string(),
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 매 프레임 새 기본 비주얼에서 출발한다. ctx의 현재 비주얼을 재사용하면
        // 불투명도 곱이 누적된다.
        let mut visuals = match self.theme {
            ThemeChoice::System => {
                if ctx.style().visuals.dark_mode {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                }
            }
            ThemeChoice::Light => egui::Visuals::light(),
            ThemeChoice::Dark => egui::Visuals::dark(),
        };
        visuals.panel_fill = visuals.panel_fill.gamma_multiply(self.window_alpha);
        ctx.set_visuals(visuals);

        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Meteor Flux Viewer"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(txt("gui.nav.settings", "Settings")).clicked() {
                        self.show_settings_modal = !self.show_settings_modal;
                    }
                });
            });
        });

        // 첫 프레임에 기본 질의로 한 번 요청한다.
        if self.initial_fetch_pending {
            self.initial_fetch_pending = false;
            self.load_plot(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_form(ui);
            ui.add_space(8.0);
            if ui
                .button(txt("gui.form.update", "Update"))
                .on_hover_text(txt(
                    "gui.form.update_tip",
                    "Query the flux service and show the returned fragment.",
                ))
                .clicked()
            {
                self.load_plot(ctx);
            }
            ui.add_space(8.0);
            self.ui_result(ui);
        });

        if self.show_settings_modal {
            self.ui_settings_modal(ctx);
        }
    }
}
