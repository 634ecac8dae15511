// Test fixtures with known documents and expected outputs
// WHY: Golden-output testing requires deterministic input/output pairs for validation

/// Mixed clinical/business prose exercising every scan pass
pub const CLINICAL_TEXT: &str = "Patients with Atrial Fibrillation (AF) were enrolled. \
The 4-digit IPC (IPC4) codes were mapped. Our Research and Development (R&D) team tracked \
Key Performance Indicators (KPIs) monthly. ECG (electrocardiogram) results were normal. \
Heart Rate (HR) was stable.\n";

/// Expected text rendering for CLINICAL_TEXT
pub const CLINICAL_EXPECTED: &str = "AF: Atrial Fibrillation
HR: Heart Rate
IPC4: 4-Digit IPC
KPIs: Key Performance Indicators
R&D: Research and Development";

/// HTML page where block elements separate the text nodes
pub const GLOSSARY_HTML: &str = "<!DOCTYPE html>\n<html><head><title>MRI (Ignored Title)</title>\
<style>.x { color: red; }</style></head><body><h1>Glossary</h1>\
<p>Magnetic Resonance Imaging (MRI) is used.</p>\
<p>WHO (World Health Organization) guidance applies.</p></body></html>";

pub const GLOSSARY_EXPECTED: &str = "MRI: Magnetic Resonance Imaging
WHO: World Health Organization";

/// Word paragraphs, one per entry
pub const WARD_PARAGRAPHS: &[&str] = &[
    "The Intensive Care Unit (ICU) admitted 12 patients.",
    "Intramuscular (IM) dosing was used.",
];

pub const WARD_EXPECTED: &str = "ICU: Intensive Care Unit
IM: Intramuscular";
