//! Brazilian registry document validation (CPF and CNPJ)
//!
//! Both document types carry two trailing check digits computed over the
//! base digits with positional weights modulo 11. Formatting characters
//! (dots, dashes, slashes) are accepted and stripped before validation.

/// Keep only ASCII digits from a document string
pub fn normalize_document(document: &str) -> String {
    document.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compute a mod-11 check digit over `digits` using `weights`
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights.iter()).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Check if a CPF (individual taxpayer number) is valid
///
/// Rules: exactly 11 digits after normalization, not a repeated single
/// digit, and both check digits must match. The first check digit weighs
/// the first 9 digits with 10 down to 2; the second weighs the first 10
/// with 11 down to 2.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let normalized = normalize_document(cpf);
    if normalized.len() != 11 {
        return false;
    }

    let digits: Vec<u32> = normalized.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let first_weights: Vec<u32> = (2..=10).rev().collect();
    if check_digit(&digits[..9], &first_weights) != digits[9] {
        return false;
    }

    let second_weights: Vec<u32> = (2..=11).rev().collect();
    check_digit(&digits[..10], &second_weights) == digits[10]
}

/// Check if a CNPJ (organization registry number) is valid
///
/// Rules: exactly 14 digits after normalization, not a repeated single
/// digit, and both check digits must match against the CNPJ weight tables.
pub fn is_valid_cnpj(cnpj: &str) -> bool {
    let normalized = normalize_document(cnpj);
    if normalized.len() != 14 {
        return false;
    }

    let digits: Vec<u32> = normalized.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    if check_digit(&digits[..12], &FIRST_WEIGHTS) != digits[12] {
        return false;
    }

    const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    check_digit(&digits[..13], &SECOND_WEIGHTS) == digits[13]
}

/// Mask a CPF for display and logs (e.g. 529******25)
pub fn mask_cpf(cpf: &str) -> String {
    let normalized = normalize_document(cpf);
    if normalized.len() == 11 {
        format!(
            "{}******{}",
            &normalized[0..3],
            &normalized[normalized.len() - 2..]
        )
    } else {
        "***********".to_string()
    }
}

/// Mask a CNPJ for display and logs (e.g. 1122********81)
pub fn mask_cnpj(cnpj: &str) -> String {
    let normalized = normalize_document(cnpj);
    if normalized.len() == 14 {
        format!(
            "{}********{}",
            &normalized[0..4],
            &normalized[normalized.len() - 2..]
        )
    } else {
        "**************".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_document() {
        assert_eq!(normalize_document("529.982.247-25"), "52998224725");
        assert_eq!(normalize_document("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize_document("abc123"), "123");
    }

    #[test]
    fn test_valid_cpf() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn test_cpf_wrong_check_digits() {
        assert!(!is_valid_cpf("52998224726"));
        assert!(!is_valid_cpf("52998224735"));
        assert!(!is_valid_cpf("111.444.777-36"));
    }

    #[test]
    fn test_cpf_single_digit_mutations_rejected() {
        let valid = "52998224725";
        for position in 0..valid.len() {
            let mut mutated: Vec<char> = valid.chars().collect();
            let original = mutated[position].to_digit(10).unwrap();
            mutated[position] = char::from_digit((original + 1) % 10, 10).unwrap();
            let mutated: String = mutated.into_iter().collect();
            assert!(!is_valid_cpf(&mutated), "mutation at {} accepted", position);
        }
    }

    #[test]
    fn test_cpf_repeated_digits_rejected() {
        // 000... and 111... pass the checksum arithmetic but are not
        // issuable documents
        for d in 0..=9 {
            let repeated = char::from_digit(d, 10).unwrap().to_string().repeat(11);
            assert!(!is_valid_cpf(&repeated));
        }
    }

    #[test]
    fn test_cpf_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247251"));
    }

    #[test]
    fn test_valid_cnpj() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("00.000.000/0001-91"));
    }

    #[test]
    fn test_cnpj_wrong_check_digits() {
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("11222333000191"));
    }

    #[test]
    fn test_cnpj_single_digit_mutations_rejected() {
        let valid = "11222333000181";
        for position in 0..valid.len() {
            let mut mutated: Vec<char> = valid.chars().collect();
            let original = mutated[position].to_digit(10).unwrap();
            mutated[position] = char::from_digit((original + 1) % 10, 10).unwrap();
            let mutated: String = mutated.into_iter().collect();
            assert!(!is_valid_cnpj(&mutated), "mutation at {} accepted", position);
        }
    }

    #[test]
    fn test_cnpj_repeated_digits_rejected() {
        for d in 0..=9 {
            let repeated = char::from_digit(d, 10).unwrap().to_string().repeat(14);
            assert!(!is_valid_cnpj(&repeated));
        }
    }

    #[test]
    fn test_cnpj_wrong_length() {
        assert!(!is_valid_cnpj(""));
        assert!(!is_valid_cnpj("1122233300018"));
        assert!(!is_valid_cnpj("112223330001811"));
    }

    #[test]
    fn test_mask_documents() {
        assert_eq!(mask_cpf("529.982.247-25"), "529******25");
        assert_eq!(mask_cnpj("11.222.333/0001-81"), "1122********81");
        assert_eq!(mask_cpf("123"), "***********");
    }
}
