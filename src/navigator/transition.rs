use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Target comes later in the page: it enters from the right.
    Forward,
    /// Target comes earlier: it enters from the left.
    Backward,
}

impl Direction {
    pub fn between(from_ordinal: usize, to_ordinal: usize) -> Self {
        match from_ordinal.cmp(&to_ordinal) {
            Ordering::Less => Direction::Forward,
            _ => Direction::Backward,
        }
    }
}

/// One slide between two articles. Offsets are horizontal pixel positions:
/// the leaving article animates from 0 to `from_end`, the entering one from
/// `to_start` to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub from: String,
    pub to: String,
    pub direction: Direction,
    pub from_end: i64,
    pub to_start: i64,
}

impl Slide {
    pub fn plan(from: &str, from_ordinal: usize, to: &str, to_ordinal: usize, width: u32) -> Self {
        let direction = Direction::between(from_ordinal, to_ordinal);
        let width = i64::from(width);
        let (from_end, to_start) = match direction {
            Direction::Forward => (-width, width),
            Direction::Backward => (width, -width),
        };
        Self {
            from: from.to_string(),
            to: to.to_string(),
            direction,
            from_end,
            to_start,
        }
    }
}

/// Host side of the page: runs slides and shows alerts. The host reports the
/// end of a slide by calling `Navigator::finish_transition`.
pub trait Stage {
    fn viewport_width(&self) -> u32;
    fn begin_slide(&mut self, slide: &Slide);
    fn alert(&mut self, message: &str);
}

/// Stage without a screen. Records what would have been shown.
#[derive(Debug, Clone)]
pub struct HeadlessStage {
    width: u32,
    slides: Vec<Slide>,
    alerts: Vec<String>,
}

impl HeadlessStage {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            slides: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32) {
        self.width = width;
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Default for HeadlessStage {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Stage for HeadlessStage {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn begin_slide(&mut self, slide: &Slide) {
        self.slides.push(slide.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_article_enters_from_the_right() {
        let slide = Slide::plan("intro", 0, "issue", 2, 800);
        assert_eq!(slide.direction, Direction::Forward);
        assert_eq!(slide.from_end, -800);
        assert_eq!(slide.to_start, 800);
    }

    #[test]
    fn earlier_article_enters_from_the_left() {
        let slide = Slide::plan("thanks", 5, "intro", 0, 640);
        assert_eq!(slide.direction, Direction::Backward);
        assert_eq!(slide.from_end, 640);
        assert_eq!(slide.to_start, -640);
    }
}
