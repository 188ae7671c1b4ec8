//! The Downside-Up Complaint Bureau's investigation tools.

mod demogorgon;
mod party;
mod records;
mod spell;

pub use demogorgon::ConsultDemogorgonTool;
pub use party::GatherPartyWisdomTool;
pub use records::CheckHawkinsRecordsTool;
pub use spell::{CastInterdimensionalSpellTool, CreativityLevel};

use crate::error::Result;
use crate::random::RandomSource;
use crate::registry::ToolRegistry;
use std::sync::Arc;

pub const BUREAU_CATEGORY: &str = "bureau";

/// Registers the four bureau tools in their canonical order.
pub fn register_bureau_tools(
    registry: &mut ToolRegistry,
    random: Arc<dyn RandomSource>,
) -> Result<()> {
    registry.register(Arc::new(ConsultDemogorgonTool::new(random.clone())))?;
    registry.register(Arc::new(CheckHawkinsRecordsTool::new()))?;
    registry.register(Arc::new(CastInterdimensionalSpellTool::new(random)))?;
    registry.register(Arc::new(GatherPartyWisdomTool::new()))?;
    Ok(())
}

pub fn bureau_registry(random: Arc<dyn RandomSource>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    register_bureau_tools(&mut registry, random)?;
    Ok(registry)
}

/// First entry whose keyword occurs in `text`, ignoring case.
pub(crate) fn match_keyword<'a>(table: &[(&str, &'a str)], text: &str) -> Option<(&'a str, String)> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(keyword, response)| (*response, keyword.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::random::StdRandom;

    const TABLE: [(&str, &str); 2] = [("portal", "about portals"), ("monsters", "about monsters")];

    #[test]
    fn test_bureau_registry_order() {
        let registry = bureau_registry(Arc::new(StdRandom::seeded(1))).unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "consult_demogorgon",
                "check_hawkins_records",
                "cast_interdimensional_spell",
                "gather_party_wisdom",
            ]
        );
        assert!(registry
            .definitions()
            .iter()
            .all(|d| d.category.as_deref() == Some(BUREAU_CATEGORY)));
    }

    #[test]
    fn test_register_twice_fails() {
        let random: Arc<dyn RandomSource> = Arc::new(StdRandom::seeded(1));
        let mut registry = bureau_registry(random.clone()).unwrap();

        let err = register_bureau_tools(&mut registry, random).unwrap_err();
        assert!(matches!(err, ToolError::AlreadyRegistered(ref name) if name == "consult_demogorgon"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_match_keyword() {
        assert_eq!(
            match_keyword(&TABLE, "The PORTAL opens"),
            Some(("about portals", "portal".to_string()))
        );
        assert_eq!(
            match_keyword(&TABLE, "monsters near the portal"),
            Some(("about portals", "portal".to_string()))
        );
        assert_eq!(match_keyword(&TABLE, "kids vs the army"), None);
    }
}
