use crate::data_transfer::{AggregatedResult, CanonicalSlot};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;

/// Writes the week report: sub-regions by name, dates in the order they were
/// collected, slots in the order the normalizer produced them.
pub fn render<W: Write>(result: &AggregatedResult, out: &mut W) -> io::Result<()> {
    for (sub_region_name, dated) in result.iter() {
        write_sub_region_banner(out, sub_region_name)?;
        if dated.is_empty() {
            writeln!(out, "No eligible slots")?;
            continue;
        }
        for (date, slots) in dated.iter() {
            write_date_heading(out, date)?;
            for slot in slots {
                write_slot(out, slot)?;
            }
        }
    }
    writeln!(
        out,
        "Found {} eligible slot(s) across {} sub-region(s)",
        result.slot_count(),
        result.sub_region_count()
    )
}

pub fn write_sub_region_banner<W: Write>(out: &mut W, sub_region_name: &str) -> io::Result<()> {
    writeln!(out, "{:=^width$}", format!(" {sub_region_name} "), width = BANNER_WIDTH)
}

pub fn write_date_heading<W: Write>(out: &mut W, date: &str) -> io::Result<()> {
    writeln!(out, "{:-^width$}", format!(" {date} "), width = BANNER_WIDTH)
}

pub fn write_slot<W: Write>(out: &mut W, slot: &CanonicalSlot) -> io::Result<()> {
    writeln!(out, "  {}", format_slot(slot))
}

pub fn format_slot(slot: &CanonicalSlot) -> String {
    let mut parts = vec![
        format!("Name: {}", slot.site_name),
        format!("PIN: {}", slot.pincode),
        format!("Vaccine: {}", slot.vaccine),
    ];
    if let Some(fee_type) = &slot.fee_type {
        parts.push(format!("Fee: {fee_type}"));
    }
    parts.push(format!("Capacity: {}", slot.available_capacity));
    if let Some(dose1) = slot.available_capacity_dose1 {
        parts.push(format!("Dose 1: {dose1}"));
    }
    if let Some(address) = &slot.address {
        parts.push(format!("Address: {address}"));
    }
    parts.join(", ")
}
