//! Páginas do LCD 16x2.
//!
//! Sem alerta, o display alterna entre três páginas a cada ciclo.
//! Com alerta ativo, a mensagem do alerta sobrepõe a rotação.

use crate::alerts::Alert;
use crate::types::{EnvReadings, HostStats, fmt_reading};

/// Largura de uma linha do LCD.
pub const LCD_COLUMNS: usize = 16;

/// Primeira linha mostrada durante um alerta.
pub const ALERT_BANNER: &str = "!!! ALERT !!!";

/// Página da rotação normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Temperatura, umidade, solo e luz
    Environment,
    /// CPU e latência
    HostHealth,
    /// Nome do time e "System Nominal"
    Nominal,
}

impl Page {
    pub const ROTATION: [Page; 3] = [Page::Environment, Page::HostHealth, Page::Nominal];
}

/// Duas linhas já ajustadas para 16 colunas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdFrame {
    pub lines: [String; 2],
}

impl LcdFrame {
    pub fn new(top: &str, bottom: &str) -> Self {
        Self {
            lines: [fit_line(top), fit_line(bottom)],
        }
    }
}

/// Alinha à esquerda, completa com espaços e corta em [`LCD_COLUMNS`].
pub fn fit_line(text: &str) -> String {
    format!("{:<width$.width$}", text, width = LCD_COLUMNS)
}

/// Contador da rotação de páginas, mantido só em memória.
#[derive(Debug, Default)]
pub struct PageRotation {
    index: usize,
}

impl PageRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Página que será mostrada no próximo ciclo sem alerta.
    pub fn current(&self) -> Page {
        Page::ROTATION[self.index]
    }

    /// Retorna a página atual e avança o contador (módulo 3).
    pub fn advance(&mut self) -> Page {
        let page = self.current();
        self.index = (self.index + 1) % Page::ROTATION.len();
        page
    }
}

/// Dados disponíveis para renderizar uma página.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub team_name: &'a str,
    pub host: &'a HostStats,
    pub env: &'a EnvReadings,
}

/// Renderiza uma página da rotação.
pub fn render_page(page: Page, ctx: &PageContext<'_>) -> LcdFrame {
    match page {
        Page::Environment => {
            let top = format!(
                "T:{}C H:{}%",
                opt_f32(ctx.env.env_temp),
                opt_f32(ctx.env.env_humidity)
            );
            let bottom = format!(
                "M:{} L:{}",
                opt_u32(ctx.env.moisture),
                opt_u32(ctx.env.light)
            );
            LcdFrame::new(&top, &bottom)
        }
        Page::HostHealth => LcdFrame::new(
            &format!("CPU: {:.1}%", ctx.host.cpu),
            &format!("Ping: {}ms", ctx.host.latency_ms),
        ),
        Page::Nominal => LcdFrame::new(ctx.team_name, "System Nominal"),
    }
}

/// Escolhe o quadro do ciclo: alerta sobrepõe, senão avança a rotação.
///
/// O contador só avança em ciclos sem alerta.
pub fn next_frame(
    rotation: &mut PageRotation,
    alert: Option<&Alert>,
    ctx: &PageContext<'_>,
) -> LcdFrame {
    match alert {
        Some(alert) => LcdFrame::new(ALERT_BANNER, &alert.message),
        None => render_page(rotation.advance(), ctx),
    }
}

fn opt_f32(value: Option<f32>) -> String {
    value.map(fmt_reading).unwrap_or_else(|| "--".into())
}

fn opt_u32(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "--".into())
}
