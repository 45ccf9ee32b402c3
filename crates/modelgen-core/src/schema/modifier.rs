use std::fmt;

/// Boolean tag on an attribute or relation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Required,
    Unique,
    Indexed,
    Generated,
    HasOne,
    BelongsTo,
    HasMany,
}

/// A set of modifiers. Membership is all that matters.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifier {
    const ALL: [Modifier; 7] = [
        Modifier::Required,
        Modifier::Unique,
        Modifier::Indexed,
        Modifier::Generated,
        Modifier::HasOne,
        Modifier::BelongsTo,
        Modifier::HasMany,
    ];

    pub fn from_name(name: &str) -> Option<Modifier> {
        Modifier::ALL
            .into_iter()
            .find(|modifier| modifier.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Required => "required",
            Modifier::Unique => "unique",
            Modifier::Indexed => "indexed",
            Modifier::Generated => "generated",
            Modifier::HasOne => "hasOne",
            Modifier::BelongsTo => "belongsTo",
            Modifier::HasMany => "hasMany",
        }
    }

    pub fn applies_to_attribute(self) -> bool {
        matches!(
            self,
            Modifier::Required | Modifier::Unique | Modifier::Indexed | Modifier::Generated
        )
    }

    pub fn applies_to_relation(self) -> bool {
        matches!(
            self,
            Modifier::Required
                | Modifier::Generated
                | Modifier::HasOne
                | Modifier::BelongsTo
                | Modifier::HasMany
        )
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl Modifiers {
    pub const fn empty() -> Modifiers {
        Modifiers(0)
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn with(mut self, modifier: Modifier) -> Modifiers {
        self.insert(modifier);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate members in canonical order
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |modifier| self.contains(*modifier))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        let mut modifiers = Modifiers::empty();
        for modifier in iter {
            modifiers.insert(modifier);
        }
        modifiers
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(value: [Modifier; N]) -> Self {
        value.into_iter().collect()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
