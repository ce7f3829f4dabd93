//! The static mnemonic registry.
//!
//! Every recognized PDP-8 opcode mnemonic (operate-group microinstructions,
//! IOT device instructions for paper tape, keyboard/teleprinter, memory
//! extension, EAE, disk, DECtape, card reader; the floating-point
//! pseudo-ops; and the six memory-reference opcodes) is listed here once,
//! built at compile time as a flat, declaration-ordered array. Lookup is a
//! linear scan returning the first match; this is correct (rather than
//! merely simple) because a handful of names are deliberately duplicated
//! with a different opcode later in the table (`CAM` appears twice, several
//! DECtape/disk mnemonics alias IOT device codes under different names) and
//! the second definition must stay unreachable.
//!
//! The table has no mutable state and no failure mode: querying a name that
//! isn't present simply returns `None`.

/// How a mnemonic's operand(s) are parsed and encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MnemonicKind {
    /// `AND, TAD, ISZ, DCA, JMS, JMP`: optional `I` indirect marker, then an
    /// address expression.
    MemRef,
    /// Everything else: no operands, the opcode stands alone and OR-combines
    /// with other mnemonics on the same line.
    Default,
}

/// A `{name, opcode, kind}` record. `opcode` is the 12-bit base pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mnemonic {
    pub name: &'static str,
    pub opcode: u16,
    pub kind: MnemonicKind,
}

static MNEMONICS: &[Mnemonic] = &[
    Mnemonic { name: "ION", opcode: 0o6001, kind: MnemonicKind::Default },
    Mnemonic { name: "IOF", opcode: 0o6002, kind: MnemonicKind::Default },
    Mnemonic { name: "RSF", opcode: 0o6011, kind: MnemonicKind::Default },
    Mnemonic { name: "RRB", opcode: 0o6012, kind: MnemonicKind::Default },
    Mnemonic { name: "RFC", opcode: 0o6014, kind: MnemonicKind::Default },
    Mnemonic { name: "PSF", opcode: 0o6021, kind: MnemonicKind::Default },
    Mnemonic { name: "PCF", opcode: 0o6022, kind: MnemonicKind::Default },
    Mnemonic { name: "PPC", opcode: 0o6024, kind: MnemonicKind::Default },
    Mnemonic { name: "PLS", opcode: 0o6026, kind: MnemonicKind::Default },
    Mnemonic { name: "KSF", opcode: 0o6031, kind: MnemonicKind::Default },
    Mnemonic { name: "KCC", opcode: 0o6032, kind: MnemonicKind::Default },
    Mnemonic { name: "KRS", opcode: 0o6034, kind: MnemonicKind::Default },
    Mnemonic { name: "KRB", opcode: 0o6036, kind: MnemonicKind::Default },
    Mnemonic { name: "NOP", opcode: 0o7000, kind: MnemonicKind::Default },
    Mnemonic { name: "IAC", opcode: 0o7001, kind: MnemonicKind::Default },
    Mnemonic { name: "RAL", opcode: 0o7004, kind: MnemonicKind::Default },
    Mnemonic { name: "RTL", opcode: 0o7006, kind: MnemonicKind::Default },
    Mnemonic { name: "RAR", opcode: 0o7010, kind: MnemonicKind::Default },
    Mnemonic { name: "RTR", opcode: 0o7012, kind: MnemonicKind::Default },
    Mnemonic { name: "CML", opcode: 0o7020, kind: MnemonicKind::Default },
    Mnemonic { name: "CMA", opcode: 0o7040, kind: MnemonicKind::Default },
    Mnemonic { name: "CLL", opcode: 0o7100, kind: MnemonicKind::Default },
    Mnemonic { name: "CLA", opcode: 0o7200, kind: MnemonicKind::Default },
    Mnemonic { name: "HLT", opcode: 0o7402, kind: MnemonicKind::Default },
    Mnemonic { name: "OSR", opcode: 0o7404, kind: MnemonicKind::Default },
    Mnemonic { name: "SKP", opcode: 0o7410, kind: MnemonicKind::Default },
    Mnemonic { name: "SNL", opcode: 0o7420, kind: MnemonicKind::Default },
    Mnemonic { name: "SZL", opcode: 0o7430, kind: MnemonicKind::Default },
    Mnemonic { name: "SZA", opcode: 0o7440, kind: MnemonicKind::Default },
    Mnemonic { name: "SNA", opcode: 0o7450, kind: MnemonicKind::Default },
    Mnemonic { name: "SMA", opcode: 0o7500, kind: MnemonicKind::Default },
    Mnemonic { name: "SPA", opcode: 0o7510, kind: MnemonicKind::Default },
    Mnemonic { name: "CIA", opcode: 0o7041, kind: MnemonicKind::Default },
    Mnemonic { name: "LAS", opcode: 0o7604, kind: MnemonicKind::Default },
    Mnemonic { name: "STL", opcode: 0o7120, kind: MnemonicKind::Default },
    Mnemonic { name: "GLK", opcode: 0o7204, kind: MnemonicKind::Default },
    Mnemonic { name: "STA", opcode: 0o7240, kind: MnemonicKind::Default },
    Mnemonic { name: "MMMM", opcode: 0o6757, kind: MnemonicKind::Default },
    Mnemonic { name: "MMSF", opcode: 0o6761, kind: MnemonicKind::Default },
    Mnemonic { name: "MMMF", opcode: 0o6756, kind: MnemonicKind::Default },
    Mnemonic { name: "MMCF", opcode: 0o6772, kind: MnemonicKind::Default },
    Mnemonic { name: "MMML", opcode: 0o6766, kind: MnemonicKind::Default },
    Mnemonic { name: "MMSC", opcode: 0o6771, kind: MnemonicKind::Default },
    Mnemonic { name: "MMLS", opcode: 0o6751, kind: MnemonicKind::Default },
    Mnemonic { name: "MMRS", opcode: 0o6774, kind: MnemonicKind::Default },
    Mnemonic { name: "MMLM", opcode: 0o6752, kind: MnemonicKind::Default },
    Mnemonic { name: "MMCC", opcode: 0o6762, kind: MnemonicKind::Default },
    Mnemonic { name: "MMLF", opcode: 0o6754, kind: MnemonicKind::Default },
    Mnemonic { name: "MMLC", opcode: 0o6764, kind: MnemonicKind::Default },
    Mnemonic { name: "DTRA", opcode: 0o6761, kind: MnemonicKind::Default },
    Mnemonic { name: "DTSF", opcode: 0o6771, kind: MnemonicKind::Default },
    Mnemonic { name: "DTCA", opcode: 0o6762, kind: MnemonicKind::Default },
    Mnemonic { name: "DTRB", opcode: 0o6772, kind: MnemonicKind::Default },
    Mnemonic { name: "DTXA", opcode: 0o6764, kind: MnemonicKind::Default },
    Mnemonic { name: "DTLB", opcode: 0o6774, kind: MnemonicKind::Default },
    Mnemonic { name: "SMP", opcode: 0o6101, kind: MnemonicKind::Default },
    Mnemonic { name: "CMP", opcode: 0o6104, kind: MnemonicKind::Default },
    Mnemonic { name: "CAM", opcode: 0o6101, kind: MnemonicKind::Default },
    Mnemonic { name: "SZO", opcode: 0o6114, kind: MnemonicKind::Default },
    Mnemonic { name: "LMQ", opcode: 0o6102, kind: MnemonicKind::Default },
    Mnemonic { name: "DIV", opcode: 0o6121, kind: MnemonicKind::Default },
    Mnemonic { name: "LAR", opcode: 0o6104, kind: MnemonicKind::Default },
    Mnemonic { name: "RDM", opcode: 0o6122, kind: MnemonicKind::Default },
    Mnemonic { name: "MUL", opcode: 0o6111, kind: MnemonicKind::Default },
    Mnemonic { name: "SAF", opcode: 0o6124, kind: MnemonicKind::Default },
    Mnemonic { name: "RDA", opcode: 0o6112, kind: MnemonicKind::Default },
    Mnemonic { name: "MUY", opcode: 0o7405, kind: MnemonicKind::Default },
    Mnemonic { name: "ASR", opcode: 0o7415, kind: MnemonicKind::Default },
    Mnemonic { name: "DVI", opcode: 0o7407, kind: MnemonicKind::Default },
    Mnemonic { name: "LSR", opcode: 0o7417, kind: MnemonicKind::Default },
    Mnemonic { name: "NMI", opcode: 0o7411, kind: MnemonicKind::Default },
    Mnemonic { name: "MQL", opcode: 0o7421, kind: MnemonicKind::Default },
    Mnemonic { name: "SHL", opcode: 0o7413, kind: MnemonicKind::Default },
    Mnemonic { name: "SCA", opcode: 0o7441, kind: MnemonicKind::Default },
    Mnemonic { name: "MQA", opcode: 0o7501, kind: MnemonicKind::Default },
    Mnemonic { name: "CAM", opcode: 0o7621, kind: MnemonicKind::Default },
    Mnemonic { name: "CDF", opcode: 0o6201, kind: MnemonicKind::Default },
    Mnemonic { name: "RIF", opcode: 0o6224, kind: MnemonicKind::Default },
    Mnemonic { name: "CIF", opcode: 0o6202, kind: MnemonicKind::Default },
    Mnemonic { name: "RMF", opcode: 0o6244, kind: MnemonicKind::Default },
    Mnemonic { name: "RDF", opcode: 0o6214, kind: MnemonicKind::Default },
    Mnemonic { name: "RIB", opcode: 0o6234, kind: MnemonicKind::Default },
    Mnemonic { name: "SPL", opcode: 0o6102, kind: MnemonicKind::Default },
    Mnemonic { name: "ADC", opcode: 0o6004, kind: MnemonicKind::Default },
    Mnemonic { name: "ADSF", opcode: 0o6531, kind: MnemonicKind::Default },
    Mnemonic { name: "ADCC", opcode: 0o6541, kind: MnemonicKind::Default },
    Mnemonic { name: "ADCV", opcode: 0o6532, kind: MnemonicKind::Default },
    Mnemonic { name: "ADSC", opcode: 0o6542, kind: MnemonicKind::Default },
    Mnemonic { name: "ADRB", opcode: 0o6534, kind: MnemonicKind::Default },
    Mnemonic { name: "ADIC", opcode: 0o6544, kind: MnemonicKind::Default },
    Mnemonic { name: "DCX", opcode: 0o6051, kind: MnemonicKind::Default },
    Mnemonic { name: "DYL", opcode: 0o6063, kind: MnemonicKind::Default },
    Mnemonic { name: "DXL", opcode: 0o6053, kind: MnemonicKind::Default },
    Mnemonic { name: "DIX", opcode: 0o6054, kind: MnemonicKind::Default },
    Mnemonic { name: "DCY", opcode: 0o6061, kind: MnemonicKind::Default },
    Mnemonic { name: "DIY", opcode: 0o6064, kind: MnemonicKind::Default },
    Mnemonic { name: "DXS", opcode: 0o6057, kind: MnemonicKind::Default },
    Mnemonic { name: "DYS", opcode: 0o6067, kind: MnemonicKind::Default },
    Mnemonic { name: "DLB", opcode: 0o6074, kind: MnemonicKind::Default },
    Mnemonic { name: "DSF", opcode: 0o6071, kind: MnemonicKind::Default },
    Mnemonic { name: "DCF", opcode: 0o6072, kind: MnemonicKind::Default },
    Mnemonic { name: "PLSF", opcode: 0o6501, kind: MnemonicKind::Default },
    Mnemonic { name: "PLCF", opcode: 0o6502, kind: MnemonicKind::Default },
    Mnemonic { name: "PLPU", opcode: 0o6504, kind: MnemonicKind::Default },
    Mnemonic { name: "PLPR", opcode: 0o6511, kind: MnemonicKind::Default },
    Mnemonic { name: "PLPU", opcode: 0o6512, kind: MnemonicKind::Default },
    Mnemonic { name: "PLDD", opcode: 0o6514, kind: MnemonicKind::Default },
    Mnemonic { name: "PLPL", opcode: 0o6521, kind: MnemonicKind::Default },
    Mnemonic { name: "PLUD", opcode: 0o6522, kind: MnemonicKind::Default },
    Mnemonic { name: "PLPD", opcode: 0o6524, kind: MnemonicKind::Default },
    Mnemonic { name: "RCSF", opcode: 0o6631, kind: MnemonicKind::Default },
    Mnemonic { name: "RCSP", opcode: 0o6671, kind: MnemonicKind::Default },
    Mnemonic { name: "RCRA", opcode: 0o6632, kind: MnemonicKind::Default },
    Mnemonic { name: "RCSE", opcode: 0o6671, kind: MnemonicKind::Default },
    Mnemonic { name: "RCRB", opcode: 0o6634, kind: MnemonicKind::Default },
    Mnemonic { name: "RCRD", opcode: 0o6674, kind: MnemonicKind::Default },
    Mnemonic { name: "CRSF", opcode: 0o6632, kind: MnemonicKind::Default },
    Mnemonic { name: "CERS", opcode: 0o6634, kind: MnemonicKind::Default },
    Mnemonic { name: "CRRB", opcode: 0o6671, kind: MnemonicKind::Default },
    Mnemonic { name: "CRSA", opcode: 0o6672, kind: MnemonicKind::Default },
    Mnemonic { name: "CRSB", opcode: 0o6674, kind: MnemonicKind::Default },
    Mnemonic { name: "CPSF", opcode: 0o6631, kind: MnemonicKind::Default },
    Mnemonic { name: "CPSE", opcode: 0o6642, kind: MnemonicKind::Default },
    Mnemonic { name: "CPLB", opcode: 0o6644, kind: MnemonicKind::Default },
    Mnemonic { name: "CPCF", opcode: 0o6641, kind: MnemonicKind::Default },
    Mnemonic { name: "LCF", opcode: 0o6652, kind: MnemonicKind::Default },
    Mnemonic { name: "LPR", opcode: 0o6655, kind: MnemonicKind::Default },
    Mnemonic { name: "LSF", opcode: 0o6661, kind: MnemonicKind::Default },
    Mnemonic { name: "LCB", opcode: 0o6662, kind: MnemonicKind::Default },
    Mnemonic { name: "LLB", opcode: 0o6664, kind: MnemonicKind::Default },
    Mnemonic { name: "DRCR", opcode: 0o6603, kind: MnemonicKind::Default },
    Mnemonic { name: "DRCF", opcode: 0o6611, kind: MnemonicKind::Default },
    Mnemonic { name: "DRTS", opcode: 0o6615, kind: MnemonicKind::Default },
    Mnemonic { name: "DRSC", opcode: 0o6622, kind: MnemonicKind::Default },
    Mnemonic { name: "DRCW", opcode: 0o6605, kind: MnemonicKind::Default },
    Mnemonic { name: "DREF", opcode: 0o6612, kind: MnemonicKind::Default },
    Mnemonic { name: "DRSE", opcode: 0o6621, kind: MnemonicKind::Default },
    Mnemonic { name: "DRCN", opcode: 0o6624, kind: MnemonicKind::Default },
    Mnemonic { name: "MSCR", opcode: 0o6701, kind: MnemonicKind::Default },
    Mnemonic { name: "MTS", opcode: 0o6706, kind: MnemonicKind::Default },
    Mnemonic { name: "MNC", opcode: 0o6712, kind: MnemonicKind::Default },
    Mnemonic { name: "MSWF", opcode: 0o6721, kind: MnemonicKind::Default },
    Mnemonic { name: "MCWF", opcode: 0o6722, kind: MnemonicKind::Default },
    Mnemonic { name: "MIWF", opcode: 0o6722, kind: MnemonicKind::Default },
    Mnemonic { name: "MDEF", opcode: 0o6732, kind: MnemonicKind::Default },
    Mnemonic { name: "MEEF", opcode: 0o6732, kind: MnemonicKind::Default },
    Mnemonic { name: "MTRS", opcode: 0o6734, kind: MnemonicKind::Default },
    Mnemonic { name: "MRWC", opcode: 0o6742, kind: MnemonicKind::Default },
    Mnemonic { name: "MCD", opcode: 0o6702, kind: MnemonicKind::Default },
    Mnemonic { name: "MSUR", opcode: 0o6711, kind: MnemonicKind::Default },
    Mnemonic { name: "MTC", opcode: 0o6716, kind: MnemonicKind::Default },
    Mnemonic { name: "MDWF", opcode: 0o6722, kind: MnemonicKind::Default },
    Mnemonic { name: "MEWF", opcode: 0o6722, kind: MnemonicKind::Default },
    Mnemonic { name: "MSEF", opcode: 0o6731, kind: MnemonicKind::Default },
    Mnemonic { name: "MCED", opcode: 0o6732, kind: MnemonicKind::Default },
    Mnemonic { name: "MIEF", opcode: 0o6732, kind: MnemonicKind::Default },
    Mnemonic { name: "MCC", opcode: 0o6741, kind: MnemonicKind::Default },
    Mnemonic { name: "MRCA", opcode: 0o6744, kind: MnemonicKind::Default },
    Mnemonic { name: "MCA", opcode: 0o6745, kind: MnemonicKind::Default },
    Mnemonic { name: "TSRD", opcode: 0o6715, kind: MnemonicKind::Default },
    Mnemonic { name: "TSWR", opcode: 0o6716, kind: MnemonicKind::Default },
    Mnemonic { name: "TSSR", opcode: 0o6722, kind: MnemonicKind::Default },
    Mnemonic { name: "TWRT", opcode: 0o6731, kind: MnemonicKind::Default },
    Mnemonic { name: "TSRS", opcode: 0o6734, kind: MnemonicKind::Default },
    Mnemonic { name: "TIFM", opcode: 0o6707, kind: MnemonicKind::Default },
    Mnemonic { name: "TSDF", opcode: 0o6721, kind: MnemonicKind::Default },
    Mnemonic { name: "TSST", opcode: 0o6724, kind: MnemonicKind::Default },
    Mnemonic { name: "TCPI", opcode: 0o6732, kind: MnemonicKind::Default },
    Mnemonic { name: "TTINCR", opcode: 0o6401, kind: MnemonicKind::Default },
    Mnemonic { name: "TTI", opcode: 0o6402, kind: MnemonicKind::Default },
    Mnemonic { name: "TTO", opcode: 0o6404, kind: MnemonicKind::Default },
    Mnemonic { name: "TTCL", opcode: 0o6411, kind: MnemonicKind::Default },
    Mnemonic { name: "TTSL", opcode: 0o6412, kind: MnemonicKind::Default },
    Mnemonic { name: "TTRL", opcode: 0o6414, kind: MnemonicKind::Default },
    Mnemonic { name: "TTSKP", opcode: 0o6421, kind: MnemonicKind::Default },
    Mnemonic { name: "TTXON", opcode: 0o6422, kind: MnemonicKind::Default },
    Mnemonic { name: "TTXOF", opcode: 0o6424, kind: MnemonicKind::Default },
    Mnemonic { name: "FEXT", opcode: 0o0000, kind: MnemonicKind::Default },
    Mnemonic { name: "FADD", opcode: 0o1000, kind: MnemonicKind::Default },
    Mnemonic { name: "FSUB", opcode: 0o2000, kind: MnemonicKind::Default },
    Mnemonic { name: "FMPY", opcode: 0o3000, kind: MnemonicKind::Default },
    Mnemonic { name: "FDIV", opcode: 0o4000, kind: MnemonicKind::Default },
    Mnemonic { name: "FGET", opcode: 0o5000, kind: MnemonicKind::Default },
    Mnemonic { name: "FPUT", opcode: 0o6000, kind: MnemonicKind::Default },
    Mnemonic { name: "FNOR", opcode: 0o7000, kind: MnemonicKind::Default },
    Mnemonic { name: "TSF", opcode: 0o6041, kind: MnemonicKind::Default },
    Mnemonic { name: "TCF", opcode: 0o6042, kind: MnemonicKind::Default },
    Mnemonic { name: "TLS", opcode: 0o6046, kind: MnemonicKind::Default },
    Mnemonic { name: "TPC", opcode: 0o6044, kind: MnemonicKind::Default },
    Mnemonic { name: "BSW", opcode: 0o7002, kind: MnemonicKind::Default },
    Mnemonic { name: "AND", opcode: 0o0000, kind: MnemonicKind::MemRef },
    Mnemonic { name: "TAD", opcode: 0o1000, kind: MnemonicKind::MemRef },
    Mnemonic { name: "ISZ", opcode: 0o2000, kind: MnemonicKind::MemRef },
    Mnemonic { name: "DCA", opcode: 0o3000, kind: MnemonicKind::MemRef },
    Mnemonic { name: "JMS", opcode: 0o4000, kind: MnemonicKind::MemRef },
    Mnemonic { name: "JMP", opcode: 0o5000, kind: MnemonicKind::MemRef },];

/// Look up a mnemonic by name. Case-sensitive, matching the assembly
/// dialect's convention of uppercase mnemonics. Returns the first matching
/// entry in declaration order.
pub fn lookup(name: &str) -> Option<Mnemonic> {
    MNEMONICS.iter().copied().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_memory_reference_mnemonic() {
        let m = lookup("TAD").unwrap();
        assert_eq!(m.opcode, 0o1000);
        assert_eq!(m.kind, MnemonicKind::MemRef);
    }

    #[test]
    fn finds_default_mnemonic() {
        let m = lookup("CLA").unwrap();
        assert_eq!(m.opcode, 0o7200);
        assert_eq!(m.kind, MnemonicKind::Default);
    }

    #[test]
    fn unknown_name_is_absent() {
        assert!(lookup("NOTAREALMNEMONIC").is_none());
    }

    #[test]
    fn duplicate_name_returns_first_declared() {
        // CAM is declared twice with different opcodes; the first (0o6101)
        // must win, and the second (0o7621) must be unreachable by lookup.
        let m = lookup("CAM").unwrap();
        assert_eq!(m.opcode, 0o6101);
    }

    #[test]
    fn is_case_sensitive() {
        assert!(lookup("tad").is_none());
    }

    #[test]
    fn lookup_is_pure_and_repeatable() {
        assert_eq!(lookup("HLT"), lookup("HLT"));
    }
}
