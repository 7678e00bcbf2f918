use crate::common::{
    BedSlot, MedrecError, PatientId, Result, FIELD_DELIMITER, NO_BED_SENTINEL,
};
use crate::record::Patient;

/// Encodes a patient as one persisted line:
/// `<id>,<name>,<age>,<disease>,<bed>` with `-1` meaning "not admitted".
///
/// The format has no escaping, so a field containing the delimiter or a line
/// break is refused here rather than written out as a line that cannot be
/// parsed back.
pub fn encode_line(patient: &Patient) -> Result<String> {
    check_field("name", &patient.name)?;
    check_field("disease", &patient.disease)?;

    let bed = patient
        .bed()
        .map_or(NO_BED_SENTINEL, |slot| slot.as_u16() as i32);

    Ok(format!(
        "{},{},{},{},{}",
        patient.id(),
        patient.name,
        patient.age,
        patient.disease,
        bed
    ))
}

fn check_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) || value.contains('\n') || value.contains('\r') {
        return Err(MedrecError::UnencodableField(field));
    }
    Ok(())
}

/// Parses one persisted line back into a patient.
///
/// `line_no` is 1-based and only used for error reporting. Any structural or
/// numeric failure yields `MalformedRecord`; the loader skips the line and
/// continues.
pub fn parse_line(line_no: usize, line: &str) -> Result<Patient> {
    let malformed = |reason: String| MedrecError::MalformedRecord {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != 5 {
        return Err(malformed(format!("expected 5 fields, got {}", fields.len())));
    }

    let id: PatientId = fields[0]
        .parse()
        .map_err(|_| malformed(format!("invalid id '{}'", fields[0])))?;

    let name = fields[1].trim().to_string();
    if name.is_empty() {
        return Err(malformed("empty name".to_string()));
    }

    let age: u32 = fields[2]
        .trim()
        .parse()
        .map_err(|_| malformed(format!("invalid age '{}'", fields[2])))?;

    let disease = fields[3].trim().to_string();

    let bed_raw: i32 = fields[4]
        .trim()
        .parse()
        .map_err(|_| malformed(format!("invalid bed '{}'", fields[4])))?;

    let bed = match bed_raw {
        NO_BED_SENTINEL => None,
        n if n >= 0 && n <= u16::MAX as i32 => Some(BedSlot::new(n as u16)),
        n => return Err(malformed(format!("bed {} out of range", n))),
    };

    Ok(Patient::with_bed(id, name, age, disease, bed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_not_admitted() {
        let p = Patient::new(PatientId::new(101), "Asha Rao", 34, "Flu");
        assert_eq!(encode_line(&p).unwrap(), "101,Asha Rao,34,Flu,-1");
    }

    #[test]
    fn test_encode_admitted() {
        let p = Patient::with_bed(
            PatientId::new(7),
            "Ben Adler",
            58,
            "Fracture",
            Some(BedSlot::new(49)),
        );
        assert_eq!(encode_line(&p).unwrap(), "7,Ben Adler,58,Fracture,49");
    }

    #[test]
    fn test_encode_rejects_delimiter_in_field() {
        let p = Patient::new(PatientId::new(1), "Rao, Asha", 34, "Flu");
        let err = encode_line(&p).unwrap_err();
        assert!(matches!(err, MedrecError::UnencodableField("name")));
    }

    #[test]
    fn test_encode_rejects_line_break_in_field() {
        let p = Patient::new(PatientId::new(1), "Asha Rao", 34, "Flu\nFever");
        let err = encode_line(&p).unwrap_err();
        assert!(matches!(err, MedrecError::UnencodableField("disease")));
        assert!(err.to_string().contains("delimiter or line break"));
    }

    #[test]
    fn test_parse_round_trip() {
        let p = Patient::with_bed(
            PatientId::new(12),
            "Carla Diaz",
            41,
            "Appendicitis",
            Some(BedSlot::new(3)),
        );
        let line = encode_line(&p).unwrap();
        let parsed = parse_line(1, &line).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn test_parse_sentinel_means_no_bed() {
        let parsed = parse_line(1, "5,Dev Mehta,29,Covid,-1").unwrap();
        assert_eq!(parsed.bed(), None);
    }

    #[test]
    fn test_parse_malformed_lines() {
        assert!(matches!(
            parse_line(3, "not-a-number,Ana,30,Flu,-1").unwrap_err(),
            MedrecError::MalformedRecord { line: 3, .. }
        ));
        assert!(matches!(
            parse_line(4, "1,Ana,thirty,Flu,-1").unwrap_err(),
            MedrecError::MalformedRecord { line: 4, .. }
        ));
        assert!(matches!(
            parse_line(5, "1,Ana,30,Flu").unwrap_err(),
            MedrecError::MalformedRecord { line: 5, .. }
        ));
        assert!(matches!(
            parse_line(6, "1,Ana,30,Flu,-2").unwrap_err(),
            MedrecError::MalformedRecord { line: 6, .. }
        ));
    }
}
