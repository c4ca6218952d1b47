use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn genelist() -> Command {
    Command::cargo_bin("genelist").unwrap()
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
fn validate_passes_a_clean_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("clean.txt");
    write(
        &list,
        "##Database=<ID=CMMS>\n\
         #Chromosome\tGene_start\tGene_stop\tHGNC_symbol\tEnsembl_gene_id\tClinical_db_gene_annotation\n\
         2\t100\t200\tSCN1A\tENSG00000144285\tIEM\n",
    );

    genelist().arg("validate").arg(&list).assert().success();
}

#[test]
fn validate_flags_a_bad_list_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("bad.txt");
    write(
        &list,
        "#Chromosome\tGene_start\tGene_stop\tHGNC_symbol\tEnsembl_gene_id\tClinical_db_gene_annotation\n\
         2\t100\t200\tSCN1A\tENSG00000144285\tIEM\n\
         chr7\t300\t200\tBRAF\tENSG00000157764\tIEM\n",
    );

    genelist()
        .arg("validate")
        .arg(&list)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not a valid Chromosome"))
        .stdout(predicate::str::contains("Gene_start 300 beyond Gene_stop 200"));
}

#[test]
fn fetch_enriches_and_the_result_validates() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("genes.tsv"),
        "2\t100\t200\tSCN1A\tENSG00000144285\t182389\tSodium channel [Source:HGNC]\n",
    );
    write(
        &dir.path().join("transcripts.tsv"),
        "ENSG00000144285\tENST00000303395\tNM_001165963\n",
    );
    write(
        &dir.path().join("phenotypes.json"),
        r#"[{
            "mim_number": "182389",
            "gene_symbols": "SCN1A",
            "gene_location": "2q24.3",
            "phenotypes": [{
                "phenotype_mim_number": "604403",
                "phenotype": "Epileptic encephalopathy",
                "inheritance": "Autosomal dominant"
            }]
        }]"#,
    );
    write(
        &dir.path().join("nomenclature.json"),
        r#"[{
            "symbol": "SCN1A",
            "omim_ids": ["182389"],
            "uniprot_ids": ["P35498"],
            "refseq_accessions": ["NM_001165963"]
        }]"#,
    );
    write(
        &dir.path().join("proteins.json"),
        r#"{"P35498": "Sodium channel protein type 1 subunit alpha"}"#,
    );
    write(
        &dir.path().join("mim2gene.txt"),
        "182389\tgene\t6323\tSCN1A\tENSG00000144285\n",
    );
    write(
        &dir.path().join("sources.toml"),
        "genes = \"genes.tsv\"\n\
         transcripts = \"transcripts.tsv\"\n\
         phenotypes = \"phenotypes.json\"\n\
         nomenclature = \"nomenclature.json\"\n\
         proteins = \"proteins.json\"\n\
         symbol_table = \"mim2gene.txt\"\n",
    );
    let infile = dir.path().join("panel.txt");
    write(
        &infile,
        "##Database=<ID=CMMS>\n\
         #Chromosome\tGene_start\tGene_stop\tHGNC_symbol\tClinical_db_gene_annotation\tReduced_penetrance\n\
         \t\t\tSCN1A\tIEM\tYes\n",
    );

    let outfile = dir.path().join("out.txt");
    genelist()
        .arg("fetch")
        .arg(&infile)
        .arg("--config")
        .arg(dir.path().join("sources.toml"))
        .arg("--outfile")
        .arg(&outfile)
        .assert()
        .success();

    let output = fs::read_to_string(&outfile).unwrap();
    assert!(output.contains("##Database=<ID=CMMS>"));
    assert!(output.contains("##contig=<ID=2>"));
    assert!(output.contains("SCN1A:182389"));
    assert!(output.contains("SCN1A:604403>AD"));
    assert!(output.contains("SCN1A:ENST00000303395>NM_001165963"));

    // the enriched list is itself a valid list
    genelist().arg("validate").arg(&outfile).assert().success();
}

#[test]
fn fetch_rejects_a_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("panel.txt");
    write(&infile, "#Chromosome\tHGNC_symbol\n");

    genelist()
        .arg("fetch")
        .arg(&infile)
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config"));
}
