use crate::core::geometry::Rect;

/// An invisible world rectangle tested against the avatar each step.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerZone {
    pub name: String,
    pub rect: Rect,
    /// Dialog shown while the avatar stands in the zone. `None` for the intro zone.
    pub message: Option<String>,
}

impl TriggerZone {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Result of one zone test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneHit {
    /// The avatar entered the intro zone for the first time this session.
    IntroFired,
    /// Index of the first overlapping info zone.
    Info(usize),
    None,
}

/// The intro zone plus the ordered info zones of one world.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    intro: Option<TriggerZone>,
    intro_consumed: bool,
    info: Vec<TriggerZone>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build zones from named world regions.
    ///
    /// `lookup` resolves a region name to its rectangle. Names it cannot
    /// resolve are skipped; the zone simply does not exist.
    pub fn from_regions<F>(intro_name: &str, catalog: &[(&str, &str)], mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<Rect>,
    {
        let mut zones = Self::new();
        match lookup(intro_name) {
            Some(rect) => {
                log::debug!("intro zone '{}' at {:?}", intro_name, rect);
                zones.intro = Some(TriggerZone::new(intro_name, rect));
            }
            None => log::debug!("intro zone '{}' not found", intro_name),
        }
        for (name, message) in catalog {
            match lookup(name) {
                Some(rect) => {
                    log::debug!("zone '{}' at {:?}", name, rect);
                    zones.info.push(TriggerZone::new(*name, rect).with_message(*message));
                }
                None => log::debug!("zone '{}' not found", name),
            }
        }
        zones
    }

    pub fn with_intro(mut self, zone: TriggerZone) -> Self {
        self.intro = Some(zone);
        self
    }

    pub fn push_info(&mut self, zone: TriggerZone) {
        self.info.push(zone);
    }

    pub fn intro(&self) -> Option<&TriggerZone> {
        self.intro.as_ref()
    }

    pub fn intro_consumed(&self) -> bool {
        self.intro_consumed
    }

    pub fn info(&self) -> &[TriggerZone] {
        &self.info
    }

    pub fn info_zone(&self, index: usize) -> Option<&TriggerZone> {
        self.info.get(index)
    }

    /// Test the avatar's bounding box against the zones.
    ///
    /// The intro zone is checked first and fires at most once. Info zones are
    /// only scanned when the intro did not fire and `intro_active` is false;
    /// the first overlapping zone in declaration order wins.
    pub fn test(&mut self, bbox: &Rect, intro_active: bool) -> ZoneHit {
        if !self.intro_consumed {
            if let Some(intro) = &self.intro {
                if intro.rect.overlaps(bbox) {
                    self.intro_consumed = true;
                    return ZoneHit::IntroFired;
                }
            }
        }
        if intro_active {
            return ZoneHit::None;
        }
        self.info
            .iter()
            .position(|zone| zone.rect.overlaps(bbox))
            .map_or(ZoneHit::None, ZoneHit::Info)
    }
}
