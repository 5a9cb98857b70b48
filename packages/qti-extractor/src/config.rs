//! Configuration constants for QTI extraction.
//!
//! Everything written into output documents that does not come from the
//! source file is defined here.

/// Default namespace declared on every output root.
pub const QTI_NAMESPACE: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Value of `xsi:schemaLocation` on every output root.
pub const QTI_SCHEMA_LOCATION: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2 http://www.imsglobal.org/profile/cc/ccv1p2/ccv1p2_qtiasiv1p2p1_v1p0.xsd";

/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Root element of an output document.
pub const ROOT_TAG: &str = "questestinterop";

/// Question item element.
pub const ITEM_TAG: &str = "item";

/// Optional grouping element around items.
pub const SECTION_TAG: &str = "section";

/// Assessment element, used as the wrapper in section-aware output.
pub const ASSESSMENT_TAG: &str = "assessment";

/// Assessment metadata copied from the source into section-aware output.
pub const ASSESSMENT_METADATA_TAG: &str = "assessmentmetadata";

/// Object bank container holding copied items.
pub const OBJECT_BANK_TAG: &str = "objectbank";

pub const TITLE_ATTR: &str = "title";
pub const IDENT_ATTR: &str = "ident";

/// Group key used when an item has no title words at all.
pub const MISCELLANEOUS_KEY: &str = "Miscellaneous";

/// Suffix appended to object bank identifiers.
pub const BANK_SUFFIX: &str = "_BANK";

/// Suffix appended to assessment identifiers in section-aware output.
pub const EXTRACTED_SUFFIX: &str = "_EXTRACTED";

/// Filename prefix for flat-mode groups.
pub const QUESTIONS_PREFIX: &str = "Questions_";

/// Filename prefix for item groups in section-aware mode when no section matched.
pub const ITEMS_PREFIX: &str = "Items_";

/// Filename prefix for matched sections.
pub const SECTION_PREFIX: &str = "";

/// Number of title words forming a flat-mode group key.
pub const FLAT_WORD_COUNT: usize = 2;

/// Number of title words forming a group key in section-aware fallback and listings.
pub const SECTION_WORD_COUNT: usize = 3;

/// Number of sample items traced at debug level.
pub const DEBUG_SAMPLE_SIZE: usize = 5;

/// Indentation width of serialized output.
pub const INDENT_WIDTH: usize = 2;
