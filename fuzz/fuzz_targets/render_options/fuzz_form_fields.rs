// IDE: cargo-fuzz target
// Run with: cargo fuzz run fuzz_form_fields
// Purpose: fuzz the generator's form fields -> RenderOptions::new(fg, bg, box_size, ecc)
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smartqr::domain::RenderOptions;

#[derive(Arbitrary, Debug)]
struct FormFields {
    fg: String,
    bg: String,
    box_size: String,
    ecc: String,
}

fuzz_target!(|fields: FormFields| {
    let _ = RenderOptions::new(fields.fg, fields.bg, fields.box_size, &fields.ecc);
});
