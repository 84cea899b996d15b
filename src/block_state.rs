use crate::error::EditError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const AIR: &str = "minecraft:air";
const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub name: SmolStr,
    pub properties: Vec<(SmolStr, SmolStr)>,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl Hash for BlockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        for (k, v) in &self.properties {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::air()
    }
}

impl BlockState {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        BlockState {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn air() -> Self {
        Self::new(AIR)
    }

    /// Plain, cave and void air all count as empty for surface scans and
    /// for the `copy_air` switch of move/stack.
    pub fn is_air(&self) -> bool {
        matches!(
            self.name.as_str(),
            AIR | "minecraft:cave_air" | "minecraft:void_air"
        )
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn set_property(&mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        let key = key.into();
        let value = value.into();
        for (k, v) in &mut self.properties {
            if *k == key {
                *v = value;
                return;
            }
        }
        self.properties.push((key, value));
    }

    pub fn get_property(&self, key: &str) -> Option<&SmolStr> {
        for (k, v) in &self.properties {
            if k == key {
                return Some(v);
            }
        }
        None
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/')
}

fn normalize_name(raw: &str) -> Result<SmolStr, EditError> {
    let raw = raw.trim();
    let (namespace, path) = match raw.split_once(':') {
        Some((ns, path)) => (ns, path),
        None => (DEFAULT_NAMESPACE, raw),
    };
    if namespace.is_empty()
        || path.is_empty()
        || !namespace.chars().all(is_identifier_char)
        || !path.chars().all(is_identifier_char)
    {
        return Err(EditError::UnknownBlock(raw.to_string()));
    }
    Ok(SmolStr::from(format!("{}:{}", namespace, path)))
}

impl FromStr for BlockState {
    type Err = EditError;

    /// Parses `stone`, `minecraft:stone` or `oak_log[axis=y]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name_part, props_part) = match s.find('[') {
            Some(open) => {
                if !s.ends_with(']') {
                    return Err(EditError::UnknownBlock(s.to_string()));
                }
                (&s[..open], Some(&s[open + 1..s.len() - 1]))
            }
            None => (s, None),
        };

        let mut block = BlockState::new(normalize_name(name_part)?);
        if let Some(props) = props_part {
            for pair in props.split(',').filter(|p| !p.trim().is_empty()) {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| EditError::UnknownBlock(s.to_string()))?;
                let (key, value) = (key.trim(), value.trim());
                if key.is_empty() || value.is_empty() {
                    return Err(EditError::UnknownBlock(s.to_string()));
                }
                block.set_property(key, value);
            }
        }
        Ok(block)
    }
}
