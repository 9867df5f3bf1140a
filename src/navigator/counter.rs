#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Low,
    VeryLow,
}

impl CounterLevel {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            CounterLevel::Normal => None,
            CounterLevel::Low => Some("low"),
            CounterLevel::VeryLow => Some("verylow"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterReading {
    pub remaining: i64,
    pub level: CounterLevel,
}

/// Remaining-characters counter for a length-limited text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    max_chars: usize,
}

impl CharCounter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn read(&self, text: &str) -> CounterReading {
        let used = text.chars().count() as i64;
        let max = self.max_chars as i64;
        let remaining = max - used;
        // 10% and 20% of max, compared without floats
        let level = if remaining * 10 <= max {
            CounterLevel::VeryLow
        } else if remaining * 5 <= max {
            CounterLevel::Low
        } else {
            CounterLevel::Normal
        };
        CounterReading { remaining, level }
    }
}
