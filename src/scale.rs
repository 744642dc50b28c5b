use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use ratatui::style::Color;

/// Linear domain-to-range mapping. Ranges may be inverted, which is how
/// the scatterplot places later hours higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    pub fn map(&self, v: f64) -> f64 {
        if self.d1 == self.d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    pub fn invert(&self, pos: f64) -> f64 {
        if self.r1 == self.r0 {
            return (self.d0 + self.d1) / 2.0;
        }
        self.d0 + (pos - self.r0) / (self.r1 - self.r0) * (self.d1 - self.d0)
    }
}

/// Square-root scale: point *area* grows linearly with the domain value,
/// so the radius goes through sqrt space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { inner: LinearScale::new((domain.0.max(0.0).sqrt(), domain.1.max(0.0).sqrt()), range) }
    }

    pub fn map(&self, v: f64) -> f64 {
        self.inner.map(v.max(0.0).sqrt())
    }
}

/// Time scale over commit instants, mapped through millisecond epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<FixedOffset>, DateTime<FixedOffset>), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (domain.0.timestamp_millis() as f64, domain.1.timestamp_millis() as f64),
                range,
            ),
        }
    }

    pub fn map(&self, t: DateTime<FixedOffset>) -> f64 {
        self.inner.map(t.timestamp_millis() as f64)
    }

    pub fn invert(&self, pos: f64) -> DateTime<Utc> {
        let millis = self.inner.invert(pos).round() as i64;
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Round a time domain outward to whole-day boundaries in the recorded
/// offsets, the "nice" fit used for the scatter x-axis.
pub fn nice_day_domain(
    domain: (DateTime<FixedOffset>, DateTime<FixedOffset>),
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    (floor_day(domain.0), ceil_day(domain.1))
}

fn floor_day(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let midnight = t.date_naive().and_hms_opt(0, 0, 0).unwrap_or(t.naive_local());
    t.offset().from_local_datetime(&midnight).single().unwrap_or(t)
}

fn ceil_day(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let floored = floor_day(t);
    if floored == t {
        t
    } else {
        floored + Duration::days(1)
    }
}

const PALETTE: [Color; 10] = [
    Color::Blue,
    Color::LightRed,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightCyan,
    Color::Gray,
];

/// Ordinal color assignment: each distinct key keeps the color it got on
/// first sight, shared between the language and file breakdowns.
#[derive(Debug, Clone, Default)]
pub struct OrdinalColors {
    assigned: Vec<String>,
}

impl OrdinalColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, key: &str) -> Color {
        let idx = match self.assigned.iter().position(|k| k == key) {
            Some(i) => i,
            None => {
                self.assigned.push(key.to_string());
                self.assigned.len() - 1
            }
        };
        PALETTE[idx % PALETTE.len()]
    }

    /// Read-only lookup for keys already assigned.
    pub fn peek(&self, key: &str) -> Option<Color> {
        self.assigned
            .iter()
            .position(|k| k == key)
            .map(|idx| PALETTE[idx % PALETTE.len()])
    }
}
