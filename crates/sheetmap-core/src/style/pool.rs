//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Style pool for deduplicating styles
///
/// Mapped records tend to repeat the same descriptors on every element, so each
/// distinct style is stored once and cells reference it by index.
#[derive(Debug)]
pub struct StylePool {
    /// All unique styles (index 0 is default)
    styles: Vec<Style>,
    /// Reverse lookup for deduplication
    index_map: AHashMap<Style, u32>,
}

impl StylePool {
    /// Create a new style pool with default style at index 0
    pub fn new() -> Self {
        let mut index_map = AHashMap::with_capacity(16);
        index_map.insert(Style::default(), 0);
        Self {
            styles: vec![Style::default()],
            index_map,
        }
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.index_map.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.index_map.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Get the default style (index 0)
    pub fn default_style(&self) -> &Style {
        &self.styles[0]
    }

    /// Get the number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool holds only the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Border, Color};

    #[test]
    fn test_default_style() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert!(pool.is_empty());
        assert_eq!(pool.get(0), Some(&Style::default()));
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();

        let idx1 = pool.get_or_insert(Style::new().bold(true));
        let idx2 = pool.get_or_insert(Style::new().bold(true));
        let idx3 = pool.get_or_insert(Style::new().background(Color::YELLOW));

        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_border_styles_are_distinct() {
        let mut pool = StylePool::new();

        let mut style = Style::new().number_format("0.00");
        style.border.top = Border::around().edge();

        let idx = pool.get_or_insert(style.clone());
        assert!(idx > 0);
        assert_eq!(pool.get(idx), Some(&style));
        assert_eq!(pool.get_or_insert(Style::new().number_format("0.00")), idx + 1);
    }
}
