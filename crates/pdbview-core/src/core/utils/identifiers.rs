use phf::{Set, phf_set};

static MAIN_CHAIN_ATOM_NAMES: Set<&'static str> = phf_set! { "N", "CA", "C" };

static DNA_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "DA", "DC", "DG", "DT", "DI", "DU",
};

static RNA_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U", "I",
};

/// True for the atoms forming the repeating N-CA-C path of a peptide chain.
pub fn is_main_chain_atom(atom_name: &str) -> bool {
    MAIN_CHAIN_ATOM_NAMES.contains(atom_name.trim())
}

pub fn is_dna_residue(residue_name: &str) -> bool {
    DNA_RESIDUE_NAMES.contains(residue_name.trim())
}

pub fn is_rna_residue(residue_name: &str) -> bool {
    RNA_RESIDUE_NAMES.contains(residue_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_main_chain_atom_recognizes_n_ca_c_only() {
        assert!(is_main_chain_atom("N"));
        assert!(is_main_chain_atom("CA"));
        assert!(is_main_chain_atom(" C "));
        assert!(!is_main_chain_atom("O"));
        assert!(!is_main_chain_atom("CB"));
        assert!(!is_main_chain_atom("ca"));
        assert!(!is_main_chain_atom(""));
    }

    #[test]
    fn nucleic_residue_names_are_classified() {
        assert!(is_dna_residue("DG"));
        assert!(!is_dna_residue("G"));
        assert!(is_rna_residue("U"));
        assert!(!is_rna_residue("ALA"));
    }
}
