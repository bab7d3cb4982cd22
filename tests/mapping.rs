use asm8::decoder::{Decoder, TableDecoder};
use asm8::instructions::{lookup, shapes, Mnemonic, Shape, TABLE};
use asm8::operand::Register;
use asm8::{Encoder, Pass};
use pretty_assertions::assert_eq;

fn sample_operands(shape: Shape) -> &'static [&'static str] {
    match shape {
        Shape::Implied => &[],
        Shape::RegReg => &["C", "A"],
        Shape::RegImm => &["B", "1"],
        Shape::MemStore => &["[0x10]", "D"],
        Shape::MemLoad => &["A", "[0x10]"],
        Shape::PortIn => &["C", "1"],
        Shape::PortOut => &["1", "B"],
        Shape::Addr => &["0x1234"],
    }
}

#[test]
fn every_entry_round_trips_through_decoder() {
    let enc = Encoder::default();
    let dec = TableDecoder::new();
    for desc in TABLE {
        let ops = sample_operands(desc.shape);
        let out = enc
            .encode(desc.mnemonic.name(), ops, 0, Pass::Collect)
            .unwrap_or_else(|e| panic!("{} {:?}: {e}", desc.mnemonic.name(), desc.shape));
        assert_eq!(out.bytes.len(), usize::from(desc.shape.size()));
        let d = dec.decode(out.bytes[0]).expect("decodes");
        assert_eq!(d.desc.mnemonic, desc.mnemonic);
        assert_eq!(d.desc.shape, desc.shape);
    }
}

#[test]
fn decoder_unpacks_registers() {
    let dec = TableDecoder::new();

    // MOV C, A
    let d = dec.decode(0x18).unwrap();
    assert_eq!(d.desc.mnemonic, Mnemonic::Mov);
    assert_eq!(d.desc.shape, Shape::RegReg);
    assert_eq!(d.dst, Some(Register::C));
    assert_eq!(d.src, Some(Register::A));

    // MOV [addr], D
    let d = dec.decode(0x97).unwrap();
    assert_eq!(d.desc.shape, Shape::MemStore);
    assert_eq!(d.dst, None);
    assert_eq!(d.src, Some(Register::D));

    // OUT port, B
    let d = dec.decode(0xE1).unwrap();
    assert_eq!(d.desc.mnemonic, Mnemonic::Out);
    assert_eq!(d.src, Some(Register::B));

    // IN C, port
    let d = dec.decode(0xD2).unwrap();
    assert_eq!(d.desc.mnemonic, Mnemonic::In);
    assert_eq!(d.dst, Some(Register::C));

    assert_eq!(dec.decode(0xF0).unwrap().desc.mnemonic, Mnemonic::Jmp);
    assert!(dec.decode(0xFF).is_none());
    assert!(dec.decode(0x01).is_none());
}

#[test]
fn no_opcode_byte_is_claimed_twice() {
    for byte in 0..=255u8 {
        let owners: Vec<_> = TABLE
            .iter()
            .filter(|d| byte & d.packing.mask() == d.opcode)
            .map(|d| (d.mnemonic.name(), d.shape))
            .collect();
        assert!(owners.len() <= 1, "{byte:#04x} claimed by {owners:?}");
    }
}

#[test]
fn mnemonics_parse_case_insensitively() {
    assert_eq!(Mnemonic::parse("reti"), Some(Mnemonic::Reti));
    assert_eq!(Mnemonic::parse("Call"), Some(Mnemonic::Call));
    assert_eq!(Mnemonic::parse("ORG"), None);
    assert_eq!(Mnemonic::parse("mova"), None);
}

#[test]
fn lookup_by_mnemonic_and_shape() {
    assert_eq!(lookup(Mnemonic::Mov, Shape::MemLoad).unwrap().opcode, 0xA4);
    assert_eq!(lookup(Mnemonic::Sub, Shape::RegImm).unwrap().opcode, 0x90);
    assert!(lookup(Mnemonic::Add, Shape::MemStore).is_none());
    assert_eq!(shapes(Mnemonic::Mov).count(), 4);
    assert!(shapes(Mnemonic::Jmp).all(|d| d.shape.arity() == 1));
}
