use crate::*;

const MOLECULES: &[&str] = &[
    "C",
    "O",
    "CCO",
    "CC(=O)O",
    "C#N",
    "c1ccccc1",
    "c1ccc2ccccc2c1",
    "Cn1cnc2c1c(=O)n(c(=O)n2C)C",
    "CC(=O)Nc1ccc(O)cc1",
    "O=[N+]([O-])c1ccccc1",
    "C1CC2CCC1C2",
    "[Na+].[Cl-]",
    "CS(=O)(=O)C",
    "c1ccsc1",
    "N#Cc1ccc(cc1)C(F)(F)F",
];

#[test]
fn node_table_has_one_row_per_atom() {
    for smiles in MOLECULES {
        let mol = from_smiles(smiles).unwrap();
        for mode in [EdgeMode::AdjacencyOnly, EdgeMode::WithBondFeatures] {
            let g = molecule_to_graph(&mol, smiles, vec![0.0], mode);
            assert_eq!(g.x_shape(), [mol.atom_count(), NUM_ATOM_FEATURES], "{smiles}");
        }
    }
}

#[test]
fn bond_mode_emits_two_entries_per_bond() {
    for smiles in MOLECULES {
        let mol = from_smiles(smiles).unwrap();
        let g = molecule_to_graph(&mol, smiles, vec![0.0], EdgeMode::WithBondFeatures);
        assert_eq!(g.num_edges(), 2 * mol.bond_count(), "{smiles}");
        assert!(g.is_undirected(), "{smiles}");
        assert!(!g.has_self_loops(), "{smiles}");
    }
}

#[test]
fn composite_key_is_non_decreasing() {
    for smiles in MOLECULES {
        for mode in [EdgeMode::AdjacencyOnly, EdgeMode::WithBondFeatures] {
            let g = smiles_to_graph(smiles, vec![0.0], mode).unwrap();
            let n = g.num_nodes();
            let keys: Vec<usize> = g.edge_index.iter().map(|&[s, d]| s * n + d).collect();
            assert!(keys.windows(2).all(|w| w[0] <= w[1]), "{smiles}");
        }
    }
}

#[test]
fn degree_column_matches_edge_list() {
    for smiles in MOLECULES {
        let g = smiles_to_graph(smiles, vec![0.0], EdgeMode::AdjacencyOnly).unwrap();
        let mut out_degree = vec![0i64; g.num_nodes()];
        for &[src, _] in &g.edge_index {
            out_degree[src] += 1;
        }
        let degree_column: Vec<i64> = g.x.iter().map(|row| row[1]).collect();
        assert_eq!(degree_column, out_degree, "{smiles}");
    }
}

#[test]
fn aromatic_codes_only_on_aromatic_bonds() {
    let g = smiles_to_graph("Cc1ccccc1", vec![0.0], EdgeMode::WithBondFeatures).unwrap();
    let attr = g.edge_attr.as_ref().unwrap();
    for (&[src, dst], &code) in g.edge_index.iter().zip(attr) {
        let both_aromatic = g.x[src][4] == 1 && g.x[dst][4] == 1;
        assert_eq!(code == AROMATIC_BOND_CODE, both_aromatic, "{src}-{dst}");
    }
}

#[test]
fn disconnected_components_leave_isolated_nodes() {
    let g = smiles_to_graph("[Na+].[Cl-]", vec![0.0], EdgeMode::AdjacencyOnly).unwrap();
    assert_eq!(g.num_edges(), 0);
    assert!(g.has_isolated_nodes());
    assert_eq!(g.x[0], [11, 0, 1, 1, 0]);
}

#[test]
fn mol_basics() {
    let mut mol = Mol::<Atom, Bond>::new();
    let c = mol.add_atom(Atom {
        atomic_num: 6,
        ..Atom::default()
    });
    let o = mol.add_atom(Atom {
        atomic_num: 8,
        ..Atom::default()
    });
    let e = mol.add_bond(
        c,
        o,
        Bond {
            order: BondOrder::Double,
            ..Bond::default()
        },
    );
    assert_eq!(mol.bond_between(o, c), Some(e));
    assert_eq!(mol.adjacency_matrix(), vec![vec![0, 1], vec![1, 0]]);
    assert_eq!(bond_code(mol.bond(e)), 2.0);
}
